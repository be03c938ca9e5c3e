//! Prints ASCII map of a glyph produced by point in path classification
//!
//! Usage: glyph [<path.json>] [<width>]
//! Without a file, a built-in glyph made of TrueType style contours is used.
#![deny(warnings)]

use pathhit::*;
use std::{env, fs::File, io::BufReader};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

/// Letter "D" with a counter, outer contour is clockwise
fn builtin_glyph() -> Path {
    let outer = [
        ContourPoint::on((0.0, 0.0)),
        ContourPoint::on((0.0, 100.0)),
        ContourPoint::on((40.0, 100.0)),
        ContourPoint::off((80.0, 100.0)),
        ContourPoint::on((80.0, 50.0)),
        ContourPoint::off((80.0, 0.0)),
        ContourPoint::on((40.0, 0.0)),
    ];
    let counter = [
        ContourPoint::on((20.0, 20.0)),
        ContourPoint::on((40.0, 20.0)),
        ContourPoint::off((60.0, 20.0)),
        ContourPoint::off((60.0, 80.0)),
        ContourPoint::on((40.0, 80.0)),
        ContourPoint::on((20.0, 80.0)),
    ];
    Path::from_contours([&outer[..], &counter[..]])
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let path = match args.next() {
        Some(file) if file != "-" => {
            let input = BufReader::new(File::open(file)?);
            tracing::debug_span!("[load]").in_scope(|| Path::load_json(input))?
        }
        _ => builtin_glyph(),
    };
    let width: usize = match args.next() {
        Some(width) => width.parse()?,
        None => 60,
    };
    tracing::debug!("[path:segments_count] {}", path.segments_count());

    let bbox = path.bbox().ok_or("path is empty")?;
    let step = bbox.width().max(bbox.height()) / width.max(1) as Scalar;
    // terminal cells are about twice as tall as they are wide
    let rows = (bbox.height() / (2.0 * step)).ceil() as usize + 1;
    let cols = (bbox.width() / step).ceil() as usize + 1;

    let _span = tracing::debug_span!("[classify]", rows, cols).entered();
    // rows go from the top, `y` axis of glyphs points up
    for row in 0..rows {
        let y = bbox.max().y() - (row as Scalar + 0.5) * 2.0 * step;
        let line: String = (0..cols)
            .map(|col| {
                let x = bbox.min().x() + (col as Scalar + 0.5) * step;
                match path.containment((x, y)) {
                    Containment::Outside => ' ',
                    Containment::Inside => '#',
                    Containment::Boundary => '+',
                }
            })
            .collect();
        println!("{}", line.trim_end());
    }
    Ok(())
}
