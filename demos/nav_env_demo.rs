// Demonstration: run the navigation arena and evaluate a baseline policy.
//
// Build/run from this repo root:
//   cargo run --example nav_env_demo -- --policy seek --episodes 50 --max-steps 1500
//
// Episode endings are logged at info level.

use std::env;

use navarena::{EnvConfig, EvaluationMetrics, NavigationEnv, Policy, RandomPolicy, SeekAvoidPolicy};

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let policy_name = arg_value(&args, "--policy").unwrap_or("seek");
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(25);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let max_steps: u32 = arg_value(&args, "--max-steps")
        .and_then(|s| s.parse().ok())
        .unwrap_or(1500);

    let mut config = EnvConfig::default();
    config.timing.max_steps = max_steps;

    let mut env = match NavigationEnv::new(config, seed) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Invalid environment: {}", e);
            std::process::exit(2);
        }
    };

    let mut policy: Box<dyn Policy> = match policy_name {
        "random" => Box::new(RandomPolicy::new(seed)),
        "seek" => Box::new(SeekAvoidPolicy::default()),
        other => {
            eprintln!("Unknown --policy '{}'; expected 'seek' or 'random'.", other);
            std::process::exit(2);
        }
    };

    match EvaluationMetrics::evaluate(&mut env, policy.as_mut(), episodes) {
        Ok(metrics) => {
            println!("Policy: {}", policy.name());
            println!("{}", metrics);
        }
        Err(e) => {
            eprintln!("Evaluation failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
