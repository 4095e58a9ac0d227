use super::*;
use core::cmp;

/// A single accepted bid.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct Bid {
    /// Account the bid belongs to.
    pub bidder: AccountAddress,
    /// Full value of the bid.
    pub amount: Amount,
}

/// The part of the state to be viewed using `concordium-client contract invoke`
#[derive(Debug, Serialize, SchemaType, Clone)]
pub struct ViewableState {
    /// The ledger's own sentinel offer; the admission threshold while no
    /// real bid has been accepted yet.
    pub base_bid: Amount,
    /// The leading bid so far (stored explicitly so that bidders can quickly
    /// see it)
    pub highest_bid: Option<Bid>,
    /// Expiration time of the auction at which bids will be closed (to be
    /// displayed to the auction participants)
    pub expiry: Timestamp,
    /// Anti-sniping window applied to bids close to the expiry.
    pub extension_window: Duration,
    /// Commission withheld from losing refunds, in percent.
    pub commission: u64,
}

/// The contract state.
/// This is the state that will be shown when the contract is queried using
/// `concordium-client contract show`.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// The part of the state that can be viewed
    pub viewable_state: ViewableState,
    /// Every accepted bid, in order of acceptance.
    pub history: Vec<Bid>,
    /// Keeping track of how much money each account has escrowed. Entries
    /// are zeroed on withdrawal, never removed: key presence marks accounts
    /// that have bid before.
    pub deposits: StateMap<AccountAddress, Amount, S>,
    /// Every account that ever placed an accepted bid, in order of first
    /// bid. Drives paginated settlement.
    pub bidders: Vec<AccountAddress>,
}

/// Payouts owed after settling a page of the bidder set. The state is
/// already consistent when this is produced; the caller performs the
/// transfers.
#[must_use]
pub struct Settlement {
    /// Net refunds owed to outbid accounts, in bidder order.
    pub refunds: Vec<(AccountAddress, Amount)>,
    /// The winning offer plus withheld commission, owed to the owner.
    pub owner_share: Amount,
}

/// `percent` of `amount`, rounded down. Widened to avoid overflow on large
/// escrows.
pub fn percent_of(amount: Amount, percent: u64) -> Amount {
    Amount::from_micro_ccd((amount.micro_ccd as u128 * percent as u128 / 100) as u64)
}

// Difference on the micro CCD level, zero on underflow.
fn remainder(amount: Amount, deduction: Amount) -> Amount {
    Amount::from_micro_ccd(amount.micro_ccd.saturating_sub(deduction.micro_ccd))
}

// Functions for creating, updating and querying the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates an empty auction state with the sentinel offer in place.
    pub fn empty(
        base_bid: Amount,
        expiry: Timestamp,
        extension_window: Duration,
        commission: u64,
        state_builder: &mut StateBuilder<S>,
    ) -> Self {
        Self {
            viewable_state: ViewableState {
                base_bid,
                highest_bid: None,
                expiry,
                extension_window,
                commission,
            },
            history: Vec::new(),
            deposits: state_builder.new_map(),
            bidders: Vec::new(),
        }
    }

    /// Amount currently leading the auction: the latest accepted bid, or
    /// the sentinel base while there is none.
    pub fn leading_amount(&self) -> Amount {
        self.viewable_state
            .highest_bid
            .map(|bid| bid.amount)
            .unwrap_or(self.viewable_state.base_bid)
    }

    /// Smallest acceptable next bid: the leading amount raised by
    /// `MIN_RAISE_PERCENT`, rounded down.
    pub fn minimum_raise(&self) -> Amount {
        let leading = self.leading_amount();
        leading + percent_of(leading, MIN_RAISE_PERCENT)
    }

    /// Admit a bid. On success the bid is recorded as the new leading
    /// offer, the bidder's escrow is credited and a bid within the
    /// extension window pulls the expiry to `slot_time + window`.
    pub fn place_bid(
        &mut self,
        bidder: AccountAddress,
        amount: Amount,
        slot_time: Timestamp,
    ) -> ContractResult<()> {
        ensure!(
            slot_time <= self.viewable_state.expiry,
            CustomContractError::AuctionFinished
        );
        ensure!(amount > Amount::zero(), CustomContractError::ZeroAmount);
        ensure!(amount >= self.minimum_raise(), CustomContractError::BidTooLow);

        if self.deposits.get(&bidder).is_none() {
            self.bidders.push(bidder);
        }
        let mut deposit = self.deposits.entry(bidder).or_insert_with(Amount::zero);
        *deposit += amount;

        let bid = Bid { bidder, amount };
        self.history.push(bid);
        self.viewable_state.highest_bid = Some(bid);

        let remaining =
            self.viewable_state.expiry.timestamp_millis() - slot_time.timestamp_millis();
        if remaining <= self.viewable_state.extension_window.millis() {
            self.viewable_state.expiry = slot_time
                .checked_add(self.viewable_state.extension_window)
                .ok_or(CustomContractError::InvalidDuration)?;
        }

        Ok(())
    }

    /// Zero the account's escrow and return the amount owed to it: the
    /// whole escrow, minus the leading amount while the account's own
    /// offer is the active one.
    pub fn withdraw(
        &mut self,
        caller: AccountAddress,
        slot_time: Timestamp,
    ) -> ContractResult<Amount> {
        ensure!(
            slot_time <= self.viewable_state.expiry,
            CustomContractError::AuctionFinished
        );

        let deposit = self
            .deposits
            .get(&caller)
            .map(|deposit| *deposit)
            .unwrap_or_else(Amount::zero);
        let locked = match self.viewable_state.highest_bid {
            Some(bid) if bid.bidder == caller => bid.amount,
            _ => Amount::zero(),
        };
        let refundable = remainder(deposit, locked);
        ensure!(
            refundable > Amount::zero(),
            CustomContractError::NothingToWithdraw
        );

        self.deposits.insert(caller, Amount::zero());

        Ok(refundable)
    }

    /// Close the auction at the given time. Every later call gated on an
    /// open auction fails from here on.
    pub fn close(&mut self, slot_time: Timestamp) {
        self.viewable_state.expiry = slot_time;
    }

    /// Settle one page of the bidder set after the auction end. Escrow
    /// balances are zeroed here, before any funds move. Accounts with
    /// nothing to settle are skipped; re-running a settled page is a no-op.
    pub fn refund_losers(
        &mut self,
        params: RefundParams,
        slot_time: Timestamp,
    ) -> ContractResult<Settlement> {
        ensure!(
            slot_time > self.viewable_state.expiry,
            CustomContractError::AuctionStillActive
        );

        let winner = self.viewable_state.highest_bid;
        let commission = self.viewable_state.commission;
        let mut settlement = Settlement {
            refunds: Vec::new(),
            owner_share: Amount::zero(),
        };

        for &bidder in self
            .bidders
            .iter()
            .skip(params.start as usize)
            .take(params.count as usize)
        {
            let deposit = self
                .deposits
                .get(&bidder)
                .map(|deposit| *deposit)
                .unwrap_or_else(Amount::zero);
            if deposit == Amount::zero() {
                continue;
            }

            // The winning offer is never refunded; it is owed to the owner.
            let locked = match winner {
                Some(bid) if bid.bidder == bidder => cmp::min(bid.amount, deposit),
                _ => Amount::zero(),
            };
            let refundable = remainder(deposit, locked);
            let fee = percent_of(refundable, commission);
            let net = remainder(refundable, fee);

            self.deposits.insert(bidder, Amount::zero());
            if net > Amount::zero() {
                settlement.refunds.push((bidder, net));
            }
            settlement.owner_share += locked + fee;
        }

        Ok(settlement)
    }

    /// The winning bid. Only available once the auction is over; `None` if
    /// the sentinel was never outbid.
    pub fn winner(&self, slot_time: Timestamp) -> ContractResult<Option<Bid>> {
        ensure!(
            slot_time > self.viewable_state.expiry,
            CustomContractError::AuctionStillActive
        );
        Ok(self.viewable_state.highest_bid)
    }
}
