use super::*;

/// Type of the parameter to the `init` function.
#[derive(Debug, Clone, Serialize, SchemaType)]
pub struct InitParameter {
    /// The ledger's own sentinel offer. The first real bid must clear the
    /// minimum raise over this amount.
    pub base_bid: Amount,
    /// How long the auction accepts bids, counted from initialization.
    pub duration: Duration,
    /// A bid arriving with no more than this duration left pulls the
    /// auction end forward to `slot_time + extension_window`.
    pub extension_window: Duration,
    /// Commission withheld from every losing refund, in percent.
    pub commission: u64,
}

/// Type of the parameter to the `refundLosers` function: one page of the
/// bidder set, in order of first bid.
#[derive(Debug, Clone, Copy, Serialize, SchemaType)]
pub struct RefundParams {
    /// Index of the first bidder to settle.
    pub start: u32,
    /// Number of bidders to settle in this call.
    pub count: u32,
}
