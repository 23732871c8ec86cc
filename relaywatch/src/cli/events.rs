use anyhow::Context;
use relaywatch_core::events::{EVENT_LISTING, expand_events};

pub fn run_events(flags: Option<&str>) -> anyhow::Result<()> {
    let Some(flags) = flags else {
        println!("Event flags:");
        println!("{EVENT_LISTING}");
        return Ok(());
    };

    let events = expand_events(flags).with_context(|| format!("cannot expand '{flags}'"))?;
    for event in events {
        println!("{event}");
    }
    Ok(())
}
