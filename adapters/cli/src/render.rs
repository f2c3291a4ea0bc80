//! Plain-text frame rendering for board snapshots.

use serpentine_core::Occupancy;
use serpentine_world::query::BoardSnapshot;

/// Renders the snapshot as one character per cell, row by row.
#[must_use]
pub(crate) fn frame(snapshot: &BoardSnapshot) -> String {
    let columns = usize::try_from(snapshot.columns).unwrap_or(0);
    let rows = usize::try_from(snapshot.rows).unwrap_or(0);
    let mut out = String::with_capacity(rows * (columns + 1));

    for row in 0..rows {
        for column in 0..columns {
            let occupancy = snapshot
                .cells
                .get(row * columns + column)
                .copied()
                .unwrap_or(Occupancy::Empty);
            out.push(glyph(occupancy));
        }
        out.push('\n');
    }

    out
}

fn glyph(occupancy: Occupancy) -> char {
    match occupancy {
        Occupancy::Empty => '.',
        Occupancy::Wall => '#',
        Occupancy::Head => '@',
        Occupancy::Body => 'o',
        Occupancy::Food => '*',
    }
}
