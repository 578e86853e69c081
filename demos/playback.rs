//! Example: drive the playback controller from a simulated clock.
//!
//! Run with:
//! `cargo run --example playback`

use std::time::Duration;

use algo_trace::{input, registry, Error, PlaybackController, PlaybackState};

fn main() -> Result<(), Error> {
    let descriptor = registry()
        .get("dynamic-programming/coin-change")
        .ok_or_else(|| Error::UnknownAlgorithm("dynamic-programming/coin-change".into()))?;
    let fields = [("coins", "1,2,5"), ("amount", "6")]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    let args = input::parse_args(descriptor.args, &fields)?;

    let mut player = PlaybackController::with_period(Duration::from_millis(300));
    let output = player.run(descriptor, &args)?;
    println!("{}: {output}", descriptor.name);

    player.play()?;
    // Host frames arrive every 16 ms; the controller turns them into ticks.
    while player.state() == PlaybackState::Playing {
        if player.advance(Duration::from_millis(16)) > 0 {
            if let Some(frame) = player.frame() {
                println!("[{}/{}] {}", frame.position + 1, frame.total, frame.step.narration);
            }
        }
    }

    player.step_back()?;
    player.step_back()?;
    println!("rewound to step {:?} ({:?})", player.position(), player.state());
    Ok(())
}
