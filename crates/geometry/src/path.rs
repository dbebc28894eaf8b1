//! Smooth trail paths.
//!
//! Turns an ordered list of waypoints into a chain of cubic Bézier segments
//! whose tangents are estimated Catmull-Rom style from the neighbouring
//! waypoints. The curve passes through every input point.

use std::fmt;

use foundation::point::Point2D;
use foundation::precision::round2;
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { to: Point2D },
    /// Control points are rounded to 2 decimals; `to` is the input anchor as-is.
    CubicTo {
        c1: Point2D,
        c2: Point2D,
        to: Point2D,
    },
}

impl PathCommand {
    /// The anchor this command ends on.
    pub fn anchor(&self) -> Point2D {
        match *self {
            PathCommand::MoveTo { to } => to,
            PathCommand::CubicTo { to, .. } => to,
        }
    }
}

/// Ordered path commands. `Display` renders SVG path data (`d` attribute).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathDescription {
    commands: Vec<PathCommand>,
}

impl PathDescription {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::CubicTo { .. }))
            .count()
    }

    /// SVG path data for this description.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PathDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo { to } => write!(f, "M{},{}", to.x, to.y)?,
                PathCommand::CubicTo { c1, c2, to } => write!(
                    f,
                    "C{},{} {},{} {},{}",
                    c1.x, c1.y, c2.x, c2.y, to.x, to.y
                )?,
            }
        }
        Ok(())
    }
}

/// Builds the smooth path through `points`.
///
/// - no points: empty description
/// - one point: a single move-to
/// - otherwise: move-to the first point, then one cubic per consecutive pair
///
/// For segment `p1 -> p2` the neighbours `p0` and `p3` are taken from the
/// sequence; at either end the missing neighbour is replicated from the
/// nearest existing point:
///
/// `c1 = p1 + (p2 - p0) / 6`, `c2 = p2 - (p3 - p1) / 6`
pub fn render_path(points: &[Point2D]) -> PathDescription {
    let Some(&first) = points.first() else {
        return PathDescription::default();
    };

    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo { to: first });

    for i in 0..points.len().saturating_sub(1) {
        let p1 = points[i];
        let p2 = points[i + 1];
        let p0 = if i == 0 { p1 } else { points[i - 1] };
        let p3 = points.get(i + 2).copied().unwrap_or(p2);

        let c1 = p1 + (p2 - p0).scale(1.0 / 6.0);
        let c2 = p2 - (p3 - p1).scale(1.0 / 6.0);

        commands.push(PathCommand::CubicTo {
            c1: Point2D::new(round2(c1.x), round2(c1.y)),
            c2: Point2D::new(round2(c2.x), round2(c2.y)),
            to: p2,
        });
    }

    PathDescription { commands }
}
