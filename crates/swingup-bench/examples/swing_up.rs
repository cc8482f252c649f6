//! End-to-end random-search loop for the cart-pole swing-up.
//!
//! Demonstrates: exploratory real rollout → model-based fitness for many
//! candidate policies → real rollout of the best candidate → trial log.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use swingup_bench::{random_parameters, reference_evaluator, reference_model};
use swingup_dynamics::{LinearPolicy, RandomPolicy, SwingUpReward, DEFAULT_MAX_U};
use swingup_rollout::{RealRollout, RolloutConfig, TrialLog};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const CANDIDATES: usize = 200;
const ROUNDS: usize = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let reward = SwingUpReward::default();
    let real = RealRollout::new(RolloutConfig::default())?;
    let model = reference_model(0.01)?;
    let evaluator = reference_evaluator(100, 42, None)?;
    let mut log = TrialLog::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    // Random exploration: collected for model fitting, never logged.
    let explorer = RandomPolicy::new(DEFAULT_MAX_U, 1)?;
    let data = real.execute(&explorer, &reward, &mut log, None)?;
    info!(
        transitions = data.transitions.len(),
        logged = log.len(),
        "exploration rollout collected"
    );

    for round in 0..ROUNDS {
        let mut best = (f64::NEG_INFINITY, LinearPolicy::zeros(DEFAULT_MAX_U));
        for _ in 0..CANDIDATES {
            let params = random_parameters(&mut rng, 2.0);
            let candidate = LinearPolicy::from_array(params, DEFAULT_MAX_U);
            let fitness = evaluator.predict_policy(&candidate, &model, &reward)?;
            if fitness > best.0 {
                best = (fitness, candidate);
            }
        }

        let policy = best.1;
        let trajectory = real.execute(&policy, &reward, &mut log, None)?;
        info!(
            round,
            predicted = best.0,
            actual = trajectory.total_reward(),
            "round complete"
        );
    }

    if let Some(entry) = log.best() {
        println!("\nBest real trial: total reward {:.3}", entry.total_reward);
        println!("  parameters: {:?}", entry.parameters);
    }
    println!("Trials logged: {}", log.len());
    Ok(())
}
