//! Display and printing utilities

use tracing::{error, info, warn};
use crate::{
    engine::BatchSummary,
    errors::EngineError,
    types::{ProfitReport, RiskLevel},
};

pub fn print_profit_report(index: usize, report: &ProfitReport) {
    let marker = if report.is_profitable() { "🎯" } else { "📉" };
    warn!("\n{} {} OPPORTUNITY #{} ({})", marker, report.strategy.to_string().to_uppercase(), index, report.id);
    warn!("💰 Base Profit:");
    warn!("   Gross: ${:.2}", report.base_profit.gross);
    warn!("   Spread: {:.3}%", report.base_profit.percentage);

    warn!("💸 Costs:");
    warn!("   Gas:      ${:.2}", report.costs.gas);
    warn!("   Slippage: ${:.2}", report.costs.slippage);
    warn!("   Fees:     ${:.2}", report.costs.fees);
    warn!("   Total:    ${:.2}", report.costs.total);

    let level_icon = match report.risks.level {
        RiskLevel::Low => "🟢",
        RiskLevel::Medium => "🟡",
        RiskLevel::High => "🔴",
    };
    warn!("⚠️  Risk Assessment:");
    warn!("   Competition: {:.2}", report.risks.competition);
    warn!("   Volatility:  {:.2}", report.risks.volatility);
    warn!("   Combined:    {:.1}/10 {} {:?}", report.risks.combined_risk_score, level_icon, report.risks.level);

    let net = &report.net_profit;
    warn!("📊 Net Profit ({} samples):", report.sample_count);
    warn!("   Expected:      ${:.2}", net.expected);
    warn!("   Risk-adjusted: ${:.2}", net.risk_adjusted);
    warn!("   Median:        ${:.2}", net.median);
    warn!("   Range:         ${:.2} .. ${:.2}", net.worst_case, net.best_case);
    warn!("   P5 / P95:      ${:.2} / ${:.2}", net.percentile_5, net.percentile_95);
    warn!(
        "   {:.0}% CI ({:?}): ${:.2} .. ${:.2}",
        report.intervals.get(net.confidence_method).confidence_level * 100.0,
        net.confidence_method,
        net.confidence_lower,
        net.confidence_upper
    );
    warn!("   Profitability: {:.1}%", report.probabilities.profitability * 100.0);
    warn!("⏱️  Calculated in {}ms", report.calculation_time_ms);
}

pub fn print_batch_failure(index: usize, error: &EngineError) {
    error!("\n❌ OPPORTUNITY #{} REJECTED [{}]", index, error.kind());
    error!("   {}", error);
}

pub fn print_batch_summary(summary: &BatchSummary) {
    info!("\n📊 Batch Summary");
    info!("   Total opportunities: {}", summary.total);
    info!("   Evaluated: {}", summary.succeeded);
    info!("   Rejected: {}", summary.failed);
    info!("   Profitable: {}", summary.profitable);
    info!("   Success rate: {:.1}%",
        if summary.total > 0 {
            (summary.profitable as f64 / summary.total as f64) * 100.0
        } else {
            0.0
        }
    );
    info!("   Total expected profit: ${:.2}", summary.total_expected_profit);
    info!("");
}
