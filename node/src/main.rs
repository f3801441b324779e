#[macro_use]
extern crate log;
extern crate chrono;
extern crate env_logger;

extern crate election;
extern crate election_modules;

use std::io::Write;
use std::thread;
use std::time::Duration;

use chrono::prelude::{DateTime, Local};
use clap::{Parser, ValueEnum};

use election::{
    colocated_store_address, validate_random_weight, Candidate, CandidateConfiguration, CandidateLabels,
    CandidateWorker, ElectionError, LoadSampler, Session, Strategy, WorkerPool,
};
use election_modules::{
    FixedLoadSampler, LoggingLeaderTask, MemoryCoordinationStore, RandomizedLoadSampler, SystemLoadSampler,
};

#[derive(Parser, Debug)]
#[command(name = "candidate-node")]
#[command(about = "Runs an ensemble of leader election candidates over an in-process coordination store")]
struct Cli {
    /// Number of candidates expected in every round
    #[arg(long, default_value = "3")]
    ensemble_size: usize,

    /// Weight of the random ranking component, between 0 and 1
    #[arg(long, default_value = "0.0", value_parser = parse_random_weight)]
    random_weight: f64,

    /// Ranking strategy
    #[arg(long, value_enum, default_value = "heuristic")]
    strategy: StrategyArg,

    /// Host name keying the barrier and registration nodes
    #[arg(long, env = "HOSTNAME")]
    hostname: String,

    /// Cluster node name, diagnostics only
    #[arg(long, env = "MY_NODE_NAME", default_value = "local")]
    node_name: String,

    /// Coordination store address. Defaults to the store co-located with the host
    #[arg(long)]
    store_address: Option<String>,

    /// Load source: "system", "random" or a fixed number
    #[arg(long, default_value = "system", value_parser = parse_load_source)]
    load: LoadSource,

    /// Candidates to run in this process. Defaults to the ensemble size
    #[arg(long)]
    candidates: Option<usize>,

    /// Seconds each leader holds the leadership
    #[arg(long, default_value = "5")]
    lead_secs: u64,

    /// Stop the candidates after the given number of seconds
    #[arg(long)]
    run_secs: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Heuristic,
    Random,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Strategy {
        match arg {
            StrategyArg::Heuristic => Strategy::Heuristic,
            StrategyArg::Random => Strategy::Random,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum LoadSource {
    System,
    Random,
    Fixed(f64),
}

fn parse_random_weight(value: &str) -> Result<f64, String> {
    let random_weight: f64 = value.parse().map_err(|err| format!("{}", err))?;
    validate_random_weight(random_weight).map_err(|err| err.to_string())?;

    Ok(random_weight)
}

fn parse_load_source(value: &str) -> Result<LoadSource, String> {
    match value {
        "system" => Ok(LoadSource::System),
        "random" => Ok(LoadSource::Random),
        other => other
            .parse::<f64>()
            .map(LoadSource::Fixed)
            .map_err(|_| format!("expected system, random or a number, got {}", other)),
    }
}

/// Load sampler selected on the command line.
#[derive(Clone, Debug)]
enum NodeLoadSampler {
    System(SystemLoadSampler),
    Randomized(RandomizedLoadSampler),
    Fixed(FixedLoadSampler),
}

impl NodeLoadSampler {
    fn new(source: LoadSource) -> NodeLoadSampler {
        match source {
            LoadSource::System => NodeLoadSampler::System(SystemLoadSampler::new()),
            LoadSource::Random => NodeLoadSampler::Randomized(RandomizedLoadSampler::default()),
            LoadSource::Fixed(load) => NodeLoadSampler::Fixed(FixedLoadSampler::new(load)),
        }
    }
}

impl LoadSampler for NodeLoadSampler {
    fn sample_load(&self) -> f64 {
        match self {
            NodeLoadSampler::System(sampler) => sampler.sample_load(),
            NodeLoadSampler::Randomized(sampler) => sampler.sample_load(),
            NodeLoadSampler::Fixed(sampler) => sampler.sample_load(),
        }
    }
}

fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            writeln!(buf, "{:5}: {} - {}", record.level(), now.format("%H:%M:%S.%3f").to_string(), record.args())
        })
        .init();
}

fn candidate_hostname(cli: &Cli, idx: usize, candidates: usize) -> String {
    if candidates == 1 {
        cli.hostname.clone()
    } else {
        format!("{}-{}", cli.hostname, idx)
    }
}

fn start_candidates(cli: &Cli) -> Result<Vec<CandidateWorker>, ElectionError> {
    let store = MemoryCoordinationStore::new();
    let address = cli
        .store_address
        .clone()
        .unwrap_or_else(|| colocated_store_address(&cli.hostname));
    let candidates = cli.candidates.unwrap_or(cli.ensemble_size);

    let mut workers = Vec::new();
    for idx in 1..=candidates {
        let hostname = candidate_hostname(cli, idx, candidates);
        let labels = CandidateLabels {
            hostname: hostname.clone(),
            node_name: cli.node_name.clone(),
        };

        let mut config = CandidateConfiguration::new(labels, cli.ensemble_size);
        config.random_weight = cli.random_weight;
        config.strategy = cli.strategy.into();

        let session = Session::connect(&store, &address)?;
        let leader_task = LoggingLeaderTask::new(hostname, Duration::from_secs(cli.lead_secs));
        let candidate = Candidate::new(session, config, NodeLoadSampler::new(cli.load), leader_task)?;

        workers.push(election::start_candidate(candidate));
    }

    Ok(workers)
}

fn main() {
    init_logger();
    let cli = Cli::parse();

    info!("Candidate node started: {:?}", cli);

    let workers = match start_candidates(&cli) {
        Ok(workers) => workers,
        Err(err) => {
            error!("Cannot start the candidates: {}", err);
            std::process::exit(1);
        }
    };
    let pool = WorkerPool::new(workers);

    if let Some(run_secs) = cli.run_secs {
        thread::sleep(Duration::from_secs(run_secs));
        info!("Stopping {} candidates", pool.len());
        pool.terminate();
    }

    for err in pool.join() {
        info!("Candidate finished: {}", err);
    }
}
