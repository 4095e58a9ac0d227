/// Tag for the Custom New Bid event.
pub const NEW_BID_TAG: u8 = u8::MAX - 5;

/// Tag for the Custom Bids Retrieve event.
pub const BIDS_RETRIEVE_TAG: u8 = u8::MAX - 6;

/// Tag for the Custom Auction Finished event.
pub const AUCTION_FINISHED_TAG: u8 = u8::MAX - 7;

/// Minimum raise a new bid must clear over the leading amount, in percent.
/// The raise is computed with integer arithmetic and rounds down.
pub const MIN_RAISE_PERCENT: u64 = 5;
