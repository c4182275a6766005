use runtime::SimulationResult;
use ui::{format_currency, format_percent, format_ratio};

pub fn render_report(result: &SimulationResult, seed: Option<u64>) -> String {
    let insight = &result.optimization;
    let final_equity = result.final_equity().unwrap_or(1.0);
    let seed = seed.map_or_else(|| "entropy".to_owned(), |seed| seed.to_string());

    let rows = [
        ("Seed", seed),
        (
            "Expected annual return",
            format_percent(result.expected_annual_return, 1),
        ),
        ("Volatility", format_percent(result.volatility, 1)),
        ("Sharpe", format_ratio(result.sharpe, 2)),
        ("Max drawdown", format_percent(result.max_drawdown, 1)),
        ("Win rate", format_percent(result.win_rate, 1)),
        ("Profit factor", format_ratio(result.profit_factor, 2)),
        (
            "Capital efficiency",
            format_currency(result.capital_efficiency),
        ),
        ("Final equity", format!("{}x", format_ratio(final_equity, 4))),
        ("Tuned risk level", insight.tuned_risk_level.to_string()),
        ("Tuned leverage", format!("{}x", insight.tuned_leverage)),
        ("Projected return", format_percent(insight.projected_return, 1)),
        (
            "Projected drawdown",
            format_percent(insight.projected_drawdown, 1),
        ),
    ];

    let mut report = String::new();
    for (label, value) in rows {
        report.push_str(&format!("{label:<24}{value}\n"));
    }
    report.push('\n');
    report.push_str(&insight.narrative);
    report.push('\n');
    report
}
