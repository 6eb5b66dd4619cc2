use crowdmines_core::{Snapshot, TileContent, display_name, tile_label};
use std::fmt::Write;

/// Draws the board the way the crowd sees it: labels on hidden tiles, contents on revealed ones.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let size = snapshot.size;

    let _ = writeln!(
        out,
        "round {} | {}x{} | {} mines",
        snapshot.generation.get() + 1,
        size,
        size,
        snapshot.mine_count
    );

    for row in 0..size {
        for col in 0..size {
            let coords = (row, col);
            let tile = snapshot.tile(coords).filter(|_| snapshot.is_revealed(coords));
            let cell = match tile.map(TileContent::count) {
                None => tile_label(coords),
                Some(None) if snapshot.is_flagged(coords) => "F".to_owned(),
                Some(None) => "*".to_owned(),
                Some(Some(0)) => String::new(),
                Some(Some(count)) => count.to_string(),
            };
            let _ = write!(out, "{:>4}", cell);
        }
        out.push('\n');
    }

    let standings = snapshot.standings();
    if !standings.is_empty() {
        out.push_str("scoreboard:\n");
        for (rank, (name, score)) in standings.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {:<10} {:>5}", rank + 1, display_name(name), score);
        }
    }

    if let Some(entry) = snapshot.chat.last() {
        let _ = writeln!(
            out,
            "last: {} {} ({:+})",
            entry.display_name(),
            entry.label(),
            entry.delta
        );
    }
    out
}
