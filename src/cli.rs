use crate::build_info;
use crate::error::*;
use crate::solver::*;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(feature = "profile-with-puffin")]
use std::sync::Mutex;

#[cfg(feature = "profile-with-puffin")]
lazy_static::lazy_static! {
    static ref PUFFIN_SERVER: Mutex<Option<puffin_http::Server>> = {
        println!("Initializing profiling server:");
        let server_addr =
                format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        println!(
                "Run this to view profiling data:  puffin_viewer {server_addr}"
            );
        let server = puffin_http::Server::new(&server_addr).ok();
        Mutex::new(server)
    };
}

/// Hot plate relaxation benchmark
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Plate size, the plate is square.
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Convergence tolerance.
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub error: f32,

    /// Safety bound on the number of iterations.
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Report cells at or above this temperature.
    #[arg(long, default_value_t = crate::threshold::DEFAULT_THRESHOLD)]
    pub threshold: f32,

    /// The number of threads to use, defaults to available parallelism.
    #[arg(short, long, env = "HOTPLATE_THREADS")]
    pub threads: Option<usize>,

    /// How to spread each iteration over threads.
    #[arg(long, value_enum, default_value_t = Strategy::default())]
    pub strategy: Strategy,

    /// How many times to run the solve.
    #[arg(short, long, default_value = "10")]
    pub repetitions: usize,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

impl Args {
    pub fn cli_setup(name: &str) -> Self {
        let args = Args::parse();

        if args.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
            .init();

        #[cfg(feature = "profile-with-puffin")]
        {
            if let Ok(server_lock) = PUFFIN_SERVER.lock() {
                if let Some(server) = server_lock.as_ref() {
                    std::thread::sleep(std::time::Duration::from_secs(2));
                    profiling::puffin::set_scopes_on(true);
                    profiling::finish_frame!();
                    println!("t: {}", server.num_clients());
                }
            }
        }

        args
    }

    pub fn solver_config(&self) -> Result<SolverConfig> {
        let config = SolverConfig::new(self.size, self.error, self.max_iterations)?
            .with_threshold(self.threshold)
            .with_strategy(self.strategy);
        match self.threads {
            Some(threads) => config.with_threads(threads),
            None => Ok(config),
        }
    }

    pub fn finish(&self) {
        #[cfg(feature = "profile-with-puffin")]
        {
            println!("Flushing profiler");
            if let Ok(mut server) = PUFFIN_SERVER.lock() {
                server.take();
            }
        }
    }
}
