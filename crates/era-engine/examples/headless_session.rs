//! A scripted session without a UI.
//!
//! Plays a few minutes of game time in a temporary save directory, then
//! exports an archive. Set `RUST_LOG=debug` to see persistence and archive
//! logging.
//!
//! ```text
//! cargo run -p era-engine --example headless_session
//! ```

use era_core::economy::Quantity;
use era_core::format::format_number;
use era_core::resource::Resource;
use era_engine::{Engine, EngineConfig, EngineEvent};
use era_save::DirStorage;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
namespace = "era-demo"
slot_count = 3
seed = 2024
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let dir = tempfile::tempdir()?;
    let config = EngineConfig::from_toml_str(CONFIG)?;
    let storage = DirStorage::open(dir.path().join("saves"))?;
    let mut engine = Engine::open(config, Box::new(storage))?;
    engine.start_new_slot(1);

    // Click the hut until we can afford to build, then expand.
    for second in 0..180 {
        for _ in 0..5 {
            engine.manual_gather("b1");
        }
        engine.buy_building("b1", Quantity::Max);
        engine.buy_building("worker1", Quantity::Next);
        if engine.quote_recruit(Quantity::Exact(1)).can_afford {
            engine.recruit_managers(Quantity::Exact(1));
        }
        engine.advance(1_000);

        if second % 30 == 29 {
            let r = engine.resources();
            println!(
                "t={:>3}s food={} wood={} huts={}",
                second + 1,
                format_number(r.get(Resource::Food)),
                format_number(r.get(Resource::Wood)),
                engine.state().building("b1").count,
            );
        }
    }

    // Toggle every unlocked manager on; the last one per building stays active.
    let unlocked: Vec<String> = engine
        .state()
        .managers
        .values()
        .filter(|m| m.unlocked)
        .map(|m| m.id.clone())
        .collect();
    for id in unlocked {
        engine.toggle_manager(&id);
    }
    engine.advance(10_000);

    let gathered = engine
        .drain_events()
        .iter()
        .filter(|e| matches!(e, EngineEvent::Gathered { .. }))
        .count();
    println!("food/s: {}", format_number(engine.rates().food));
    println!("feedback events retained: {gathered}");

    let file = engine.export_archive()?;
    std::fs::write(dir.path().join(&file.file_name), &file.contents)?;
    println!("exported {} ({} bytes)", file.file_name, file.contents.len());
    Ok(())
}
