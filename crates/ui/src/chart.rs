use core_sim::EquityPoint;

const VIEWBOX: f64 = 100.0;

/// SVG `points` attribute for the equity curve inside a 100x100 viewbox.
///
/// x spreads the points evenly; y is inverted so higher equity sits higher. A flat
/// curve is drawn along the bottom edge.
pub fn equity_polyline(curve: &[EquityPoint]) -> String {
    if curve.is_empty() {
        return String::new();
    }

    let (min_equity, max_equity) = curve.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), point| (min.min(point.equity), max.max(point.equity)),
    );
    let span = match max_equity - min_equity {
        span if span == 0.0 => 1.0,
        span => span,
    };
    let last_index = match curve.len() - 1 {
        0 => 1,
        last => last,
    } as f64;

    curve
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let x = (idx as f64 / last_index) * VIEWBOX;
            let normalized = (point.equity - min_equity) / span;
            let y = VIEWBOX - normalized * VIEWBOX;
            format!("{},{}", round4(x), round4(y))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use core_sim::EquityPoint;

    use super::equity_polyline;

    fn point(index: usize, equity: f64) -> EquityPoint {
        EquityPoint {
            index,
            equity,
            drawdown: 0.0,
        }
    }

    #[test]
    fn empty_curve_renders_nothing() {
        assert_eq!(equity_polyline(&[]), "");
    }

    #[test]
    fn normalizes_into_viewbox() {
        let curve = [point(0, 1.0), point(1, 1.5), point(2, 1.25)];

        assert_eq!(equity_polyline(&curve), "0,100 50,0 100,50");
    }

    #[test]
    fn flat_curve_sits_on_bottom_edge() {
        let curve = [point(0, 1.0), point(1, 1.0)];

        assert_eq!(equity_polyline(&curve), "0,100 100,100");
    }

    #[test]
    fn single_point_is_drawn_at_origin() {
        assert_eq!(equity_polyline(&[point(0, 1.2)]), "0,100");
    }

    #[test]
    fn rounds_to_four_decimals() {
        let curve = [point(0, 1.0), point(1, 2.0), point(2, 1.5), point(3, 1.0)];

        assert_eq!(equity_polyline(&curve), "0,100 33.3333,0 66.6667,50 100,100");
    }
}
