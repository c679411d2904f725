//! Plain-text rendering for terminal output

use retention_roi_core_rs::{PlanCatalog, PlanKey, ProjectionResult};
use std::fmt::Write;

fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn days(value: u64) -> String {
    if value == 0 {
        "no break-even".to_string()
    } else {
        format!("{} days", value)
    }
}

pub fn render_projection(result: &ProjectionResult) -> String {
    let retention = &result.breakdown.retention;
    let cost = &result.breakdown.cost;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Inputs: {} customers/month, {:.2} average order, {} returning",
        result.inputs.monthly_customers,
        result.inputs.average_order_value,
        result.inputs.returning_customers
    );
    let _ = writeln!(
        out,
        "Retention: {} now -> {} target ({} / {} / {} / {} at months 1/2/3/6)",
        percent(retention.current_rate),
        percent(retention.target_rate),
        percent(retention.rates.month_1),
        percent(retention.rates.month_2),
        percent(retention.rates.month_3),
        percent(retention.rates.month_6),
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Current revenue:       {:>14.2}", result.current_revenue);
    let _ = writeln!(out, "Lost revenue:          {:>14.2}", result.lost_revenue);
    let _ = writeln!(out, "Competitor advantage:  {:>14.2}", result.competitor_advantage);
    let _ = writeln!(out, "Potential (month 6):   {:>14.2}", result.potential_revenue);
    let _ = writeln!(out, "Yearly increase:       {:>14.2}", result.yearly_increase);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Plan: {} (recommended: {})",
        result.selected_plan, result.recommended_plan
    );
    let _ = writeln!(
        out,
        "Messages: {} needed, {} over quota",
        cost.messages_needed, cost.overage_messages
    );
    let _ = writeln!(out, "Plan cost:             {:>14.2}", result.plan_cost);
    let _ = writeln!(out, "Total monthly cost:    {:>14.2}", result.total_monthly_cost);
    let _ = writeln!(out, "Net monthly gain:      {:>14.2}", result.net_monthly_gain);
    let _ = writeln!(out, "ROI:                   {:>13.1}%", result.roi);
    let _ = writeln!(out, "Break-even:            {:>14}", days(result.days_to_break_even));
    out
}

pub fn render_comparison(results: &[ProjectionResult], cheapest: PlanKey) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>10} {:>14} {:>12} {:>16}",
        "plan", "messages", "monthly cost", "roi", "break-even"
    );
    for result in results {
        let mut marks = String::new();
        if result.selected_plan == result.recommended_plan {
            marks.push_str(" recommended");
        }
        if result.selected_plan == cheapest {
            marks.push_str(" cheapest");
        }
        let _ = writeln!(
            out,
            "{:<10} {:>10} {:>14.2} {:>11.1}% {:>16}{}",
            result.selected_plan,
            result.messages_needed,
            result.total_monthly_cost,
            result.roi,
            days(result.days_to_break_even),
            marks
        );
    }
    out
}

pub fn render_catalog(catalog: &PlanCatalog, exchange_rate: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>10} {:>12} {:>10} {:>12}",
        "plan", "usd/month", "local/month", "messages", "overage usd"
    );
    for plan in catalog.iter() {
        let _ = writeln!(
            out,
            "{:<10} {:>10.2} {:>12.2} {:>10} {:>12.3}",
            plan.name,
            plan.monthly_price_usd,
            plan.monthly_price_usd * exchange_rate,
            plan.messages_included,
            plan.additional_message_cost_usd
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use retention_roi_core_rs::{compute_projection, PlanKey};

    #[test]
    fn test_render_projection_mentions_plans() {
        let result = compute_projection(100, 2500.0, 20, PlanKey::Basic);
        let text = render_projection(&result);
        assert!(text.contains("Plan: basic (recommended: standard)"));
        assert!(text.contains("Messages: 400 needed, 0 over quota"));
    }

    #[test]
    fn test_render_zero_break_even() {
        assert_eq!(days(0), "no break-even");
        assert_eq!(days(45), "45 days");
    }
}
