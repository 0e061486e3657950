use crate::error::*;
use crate::plate::*;

/// Two generations of the plate.
/// `generation` names the buffer read this iteration;
/// the other one is written. Swapping flips the toggle.
#[derive(Clone, Debug)]
pub struct Plate {
    buffers: [Grid; 2],
    generation: usize,
}

impl Plate {
    /// Allocate both generations and initialize them identically.
    pub fn try_new(size: usize, sources: &StaticSources) -> Result<Self> {
        let mut a = Grid::try_new(size, 0.0)?;
        let mut b = Grid::try_new(size, 0.0)?;
        initialize(&mut a, sources);
        initialize(&mut b, sources);
        Ok(Plate {
            buffers: [a, b],
            generation: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.buffers[0].size()
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn current(&self) -> &Grid {
        &self.buffers[self.generation]
    }

    pub fn next(&self) -> &Grid {
        &self.buffers[1 - self.generation]
    }

    pub fn next_mut(&mut self) -> &mut Grid {
        &mut self.buffers[1 - self.generation]
    }

    /// Read the current generation while writing the next one.
    pub fn split_mut(&mut self) -> (&Grid, &mut Grid) {
        let [a, b] = &mut self.buffers;
        if self.generation == 0 {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Both generations indexed by generation number.
    pub(crate) fn buffers_mut(&mut self) -> &mut [Grid; 2] {
        &mut self.buffers
    }

    pub fn swap(&mut self) {
        self.generation = 1 - self.generation;
    }

    pub fn into_current(self) -> Grid {
        let [a, b] = self.buffers;
        if self.generation == 0 {
            a
        } else {
            b
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::util::*;

    #[test]
    fn swap_flips_roles() {
        let sources = StaticSources::for_size(5);
        let mut plate = Plate::try_new(5, &sources).unwrap();
        assert_eq!(plate.current(), plate.next());

        plate.next_mut().set(&vector![2, 2], 1.0);
        assert_eq!(plate.current().get(&vector![2, 2]), 50.0);

        let next_ptr = plate.next().cells().as_ptr();
        plate.swap();
        assert_eq!(plate.generation(), 1);
        assert_eq!(plate.current().cells().as_ptr(), next_ptr);
        assert_eq!(plate.current().get(&vector![2, 2]), 1.0);

        plate.swap();
        assert_eq!(plate.generation(), 0);
        assert_eq!(plate.current().get(&vector![2, 2]), 50.0);
    }

    #[test]
    fn split_follows_generation() {
        let sources = StaticSources::for_size(4);
        let mut plate = Plate::try_new(4, &sources).unwrap();
        plate.swap();
        {
            let (current, next) = plate.split_mut();
            assert_eq!(current.get(&vector![1, 1]), 50.0);
            next.set(&vector![1, 1], 9.0);
        }
        assert_eq!(plate.next().get(&vector![1, 1]), 9.0);
        plate.swap();
        assert_eq!(plate.into_current().get(&vector![1, 1]), 9.0);
    }
}
