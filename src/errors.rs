use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Only the contract owner can call this function (Error code: -4).
    Unauthorized,
    /// The contract owner is not allowed to perform this action
    /// (Error code: -5).
    OwnerForbidden,
    /// Only account addresses can participate in the auction
    /// (Error code: -6).
    OnlyAccountAddress,
    // Raised if a bid or withdrawal is placed after the auction end
    // (Error code: -7)
    AuctionFinished,
    // Raised if there is an attempt to settle the auction before its expiry
    // (Error code: -8)
    AuctionStillActive,
    /// Bids of zero CCD are not accepted (Error code: -9).
    ZeroAmount,
    // Raised if bid does not clear the minimum raise over the leading
    // amount (Error code: -10)
    BidTooLow,
    /// No withdrawable balance for this account (Error code: -11).
    NothingToWithdraw,
    /// Commission must not exceed 100 percent (Error code: -12).
    InvalidCommission,
    /// Duration is either too far in the future or in the past
    /// (Error code: -13).
    InvalidDuration,
    /// Failed to invoke a transfer (Error code: -14).
    InvokeTransferError,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to transfer invocations to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

pub type ContractResult<A> = Result<A, CustomContractError>;
