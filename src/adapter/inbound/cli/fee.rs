//! Handler for `hedgepool fee`.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::domain::fee::{fee_rate, fee_tier_label};
use crate::error::Result;

/// Execute `fee <count>`.
pub fn execute(count: usize) -> Result<()> {
    let rate = fee_rate(count);
    let tier = fee_tier_label(count);

    if output::is_json() {
        output::json_output(json!({
            "command": "fee",
            "investors": count,
            "rate": rate,
            "tier": tier,
        }));
        return Ok(());
    }

    output::field("Investors", count);
    output::field("Tier", tier);
    output::field("Fee rate", output::percent(rate));
    Ok(())
}
