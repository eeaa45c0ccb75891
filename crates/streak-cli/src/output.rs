use serde::Serialize;
use streak_core::milestone::Celebration;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_celebration(c: &Celebration) {
    println!();
    println!("{}", c.title);
    println!("{}", c.message);
    println!("{}", c.media_url);
}
