use anyhow::{bail, Result};
use hegemon_core::testing::WorldStateBuilder;
use hegemon_core::WorldState;

/// Nation tags handed out in seat order.
const TAGS: [&str; 6] = ["AZR", "CRM", "EMR", "GLD", "UMB", "VRD"];

/// Starting men in each nation's first army.
const STARTING_ARMY: i64 = 1000;

/// Build the opening world: a width×height grid with each nation seated in
/// its own corner (then edge midpoints), holding one capital province and
/// one army. When `human` is set the first seat is player-controlled.
pub fn build_scenario(
    width: u32,
    height: u32,
    nations: usize,
    human: bool,
    seed: u64,
) -> Result<WorldState> {
    if width < 2 || height < 2 {
        bail!("the map must be at least 2x2, got {width}x{height}");
    }
    if nations < 2 || nations > TAGS.len() {
        bail!("nation count must be between 2 and {}, got {nations}", TAGS.len());
    }

    let seats = seat_provinces(width, height);
    if nations > seats.len() {
        bail!("a {width}x{height} map seats at most {} nations", seats.len());
    }

    let mut builder = WorldStateBuilder::new().seed(seed).with_grid(width, height);
    for (i, tag) in TAGS.iter().take(nations).enumerate() {
        let capital = seats[i];
        builder = builder
            .with_nation(tag, human && i == 0)
            .with_owner(capital, tag)
            .with_capital(capital)
            .with_army(i as u32 + 1, tag, capital, STARTING_ARMY);
    }

    let mut state = builder.build();
    state.next_army_id = nations as u32 + 1;
    Ok(state)
}

/// Seat positions: the four corners, then the midpoints of the top and
/// bottom edges. Distinct as long as the map is at least 2x2.
fn seat_provinces(width: u32, height: u32) -> Vec<u32> {
    let id = |x: u32, y: u32| y * width + x;
    let mut seats = vec![
        id(0, 0),
        id(width - 1, height - 1),
        id(width - 1, 0),
        id(0, height - 1),
        id(width / 2, 0),
        id(width / 2, height - 1),
    ];
    // Midpoints collide with corners on narrow maps.
    let mut seen = std::collections::HashSet::new();
    seats.retain(|s| seen.insert(*s));
    seats
}
