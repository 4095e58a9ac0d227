use super::*;

/// Init function that creates a new auction
#[init(contract = "AscendingAuction", parameter = "InitParameter")]
fn auction_init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let parameter: InitParameter = ctx.parameter_cursor().get()?;
    ensure!(
        parameter.commission <= 100,
        CustomContractError::InvalidCommission.into()
    );
    let expiry = ctx
        .metadata()
        .slot_time()
        .checked_add(parameter.duration)
        .ok_or(CustomContractError::InvalidDuration)?;
    Ok(State::empty(
        parameter.base_bid,
        expiry,
        parameter.extension_window,
        parameter.commission,
        state_builder,
    ))
}

/// Receive function in which accounts can bid before the auction end time.
/// The attached CCD is the full value of the new offer and joins the
/// account's escrow.
#[receive(
    contract = "AscendingAuction",
    name = "bid",
    mutable,
    enable_logger,
    payable
)]
fn auction_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let owner = ctx.owner();
    let bidder = match ctx.sender() {
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress),
        Address::Account(account_address) => account_address,
    };
    // The owner may not raise the price of their own auction
    ensure!(bidder != owner, CustomContractError::OwnerForbidden);

    let slot_time = ctx.metadata().slot_time();
    host.state_mut().place_bid(bidder, amount, slot_time)?;

    // Event for Biding.
    logger.log(&CustomEvent::NewBid(NewBidEvent { bidder, amount }))?;

    Ok(())
}

/// Receive function for reclaiming escrowed funds while the auction is
/// still open. The leading offer stays locked; everything above it is
/// returned.
#[receive(
    contract = "AscendingAuction",
    name = "withdraw",
    mutable,
    enable_logger
)]
fn auction_withdraw<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let owner = ctx.owner();
    let account = match ctx.sender() {
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress),
        Address::Account(account_address) => account_address,
    };
    ensure!(account != owner, CustomContractError::OwnerForbidden);

    let slot_time = ctx.metadata().slot_time();
    // The escrow is zeroed before any funds leave the contract; a failed
    // transfer rejects the call and the host reverts the zeroing.
    let refundable = host.state_mut().withdraw(account, slot_time)?;
    host.invoke_transfer(&account, refundable)?;

    // Event for retrieval of bids.
    logger.log(&CustomEvent::BidsRetrieve(BidsRetrieveEvent {
        account,
        amount: refundable,
    }))?;

    Ok(())
}

/// Receive function used by the owner to end the auction, at any time,
/// including before the natural expiry.
#[receive(
    contract = "AscendingAuction",
    name = "close",
    mutable,
    enable_logger
)]
fn auction_close<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let owner = ctx.owner();
    let sender = ctx.sender();
    // Ensuring sender is the contract owner
    ensure!(
        sender.matches_account(&owner),
        CustomContractError::Unauthorized
    );

    let slot_time = ctx.metadata().slot_time();
    host.state_mut().close(slot_time);

    // Event for Finalize.
    logger.log(&CustomEvent::AuctionFinished(slot_time))?;

    Ok(())
}

/// Receive function used by the owner to settle escrowed funds after the
/// auction end, one page of the bidder set per call. Losing bidders get
/// their escrow back minus the commission; the winning offer and the
/// withheld commission are transferred to the owner.
#[receive(
    contract = "AscendingAuction",
    name = "refundLosers",
    parameter = "RefundParams",
    mutable,
    enable_logger
)]
fn auction_refund_losers<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let owner = ctx.owner();
    let sender = ctx.sender();
    // Ensuring sender is the contract owner
    ensure!(
        sender.matches_account(&owner),
        CustomContractError::Unauthorized
    );

    let params: RefundParams = ctx.parameter_cursor().get()?;
    let slot_time = ctx.metadata().slot_time();
    let settlement = host.state_mut().refund_losers(params, slot_time)?;

    // Return escrow to outbid accounts
    for &(account, amount) in settlement.refunds.iter() {
        host.invoke_transfer(&account, amount)?;
        logger.log(&CustomEvent::BidsRetrieve(BidsRetrieveEvent {
            account,
            amount,
        }))?;
    }

    if settlement.owner_share > Amount::zero() {
        host.invoke_transfer(&owner, settlement.owner_share)?;
    }

    Ok(())
}

/// View function that returns the auction configuration and leading bid,
/// without the per-account escrow map.
#[receive(
    contract = "AscendingAuction",
    name = "view",
    return_value = "ViewableState"
)]
fn auction_view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ViewableState> {
    Ok(host.state().viewable_state.clone())
}

/// View function that returns the current leading bid, `None` while the
/// sentinel offer still leads.
#[receive(
    contract = "AscendingAuction",
    name = "viewHighestBid",
    return_value = "Option<Bid>"
)]
fn auction_view_highest_bid<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Option<Bid>> {
    Ok(host.state().viewable_state.highest_bid)
}

/// View function that returns every accepted bid, in order of acceptance.
#[receive(
    contract = "AscendingAuction",
    name = "viewBids",
    return_value = "Vec<Bid>"
)]
fn auction_view_bids<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Vec<Bid>> {
    Ok(host.state().history.clone())
}

/// View function that returns the winning bid once the auction is over.
#[receive(
    contract = "AscendingAuction",
    name = "viewWinner",
    return_value = "Option<Bid>"
)]
fn auction_view_winner<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Option<Bid>> {
    host.state().winner(ctx.metadata().slot_time())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use core::fmt::Debug;
    use test_infrastructure::*;

    const AUCTION_END: u64 = 86_400_000;
    const WINDOW: u64 = 600_000;
    const BASE: u64 = 1_000_000;
    const COMMISSION: u64 = 5;

    const OWNER: AccountAddress = AccountAddress([0u8; 32]);
    const ALICE: AccountAddress = AccountAddress([1u8; 32]);
    const BOB: AccountAddress = AccountAddress([2u8; 32]);
    const CAROL: AccountAddress = AccountAddress([3u8; 32]);

    // Valid raises over BASE: each is the previous plus 5%, rounded down.
    const RAISE_1: u64 = 1_050_000;
    const RAISE_2: u64 = 1_102_500;
    const RAISE_3: u64 = 1_157_625;

    fn init_parameter() -> InitParameter {
        InitParameter {
            base_bid: Amount::from_micro_ccd(BASE),
            duration: Duration::from_millis(AUCTION_END),
            extension_window: Duration::from_millis(WINDOW),
            commission: COMMISSION,
        }
    }

    fn create_parameter_bytes(parameter: &InitParameter) -> Vec<u8> {
        to_bytes(parameter)
    }

    fn parametrized_init_ctx<'a>(parameter_bytes: &'a [u8]) -> TestInitContext<'a> {
        let mut ctx = TestInitContext::empty();
        ctx.set_parameter(parameter_bytes);
        ctx.set_metadata_slot_time(Timestamp::from_timestamp_millis(0));
        ctx
    }

    fn new_ctx<'a>(
        owner: AccountAddress,
        sender: AccountAddress,
        slot_time: u64,
    ) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender));
        ctx.set_owner(owner);
        ctx.set_metadata_slot_time(Timestamp::from_timestamp_millis(slot_time));
        ctx
    }

    fn fresh_host() -> TestHost<State<TestStateApi>> {
        let parameter_bytes = create_parameter_bytes(&init_parameter());
        let ctx = parametrized_init_ctx(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = auction_init(&ctx, &mut state_builder).expect("Initialization should pass");
        TestHost::new(state, state_builder)
    }

    fn expect_error<E, T>(expr: Result<T, E>, err: E, msg: &str)
    where
        E: Eq + Debug,
        T: Debug,
    {
        let actual = expr.expect_err(msg);
        assert_eq!(actual, err);
    }

    fn bid(
        host: &mut TestHost<State<TestStateApi>>,
        bidder: AccountAddress,
        micro_ccd: u64,
        slot_time: u64,
        logger: &mut TestLogger,
    ) -> ContractResult<()> {
        let ctx = new_ctx(OWNER, bidder, slot_time);
        auction_bid(&ctx, host, Amount::from_micro_ccd(micro_ccd), logger)
    }

    fn withdraw(
        host: &mut TestHost<State<TestStateApi>>,
        account: AccountAddress,
        slot_time: u64,
        logger: &mut TestLogger,
    ) -> ContractResult<()> {
        let ctx = new_ctx(OWNER, account, slot_time);
        auction_withdraw(&ctx, host, logger)
    }

    fn refund_losers(
        host: &mut TestHost<State<TestStateApi>>,
        sender: AccountAddress,
        start: u32,
        count: u32,
        slot_time: u64,
        logger: &mut TestLogger,
    ) -> ContractResult<()> {
        let parameter_bytes = to_bytes(&RefundParams { start, count });
        let mut ctx = new_ctx(OWNER, sender, slot_time);
        ctx.set_parameter(&parameter_bytes);
        auction_refund_losers(&ctx, host, logger)
    }

    fn deposit_of(
        host: &TestHost<State<TestStateApi>>,
        account: &AccountAddress,
    ) -> Option<Amount> {
        host.state().deposits.get(account).map(|deposit| *deposit)
    }

    fn expiry_millis(host: &TestHost<State<TestStateApi>>) -> u64 {
        host.state().viewable_state.expiry.timestamp_millis()
    }

    #[concordium_test]
    /// Test that initialization produces the sentinel state: no bids, no
    /// escrow, expiry at creation time plus the configured duration.
    fn test_init() {
        let host = fresh_host();
        let state = host.state();

        claim_eq!(state.viewable_state.highest_bid, None);
        claim_eq!(state.viewable_state.base_bid, Amount::from_micro_ccd(BASE));
        claim_eq!(expiry_millis(&host), AUCTION_END);
        claim!(state.history.is_empty());
        claim!(state.bidders.is_empty());

        // A commission over 100% is not a valid configuration.
        let mut over = init_parameter();
        over.commission = 101;
        let parameter_bytes = create_parameter_bytes(&over);
        let ctx = parametrized_init_ctx(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();
        claim!(auction_init(&ctx, &mut state_builder).is_err());
    }

    #[concordium_test]
    /// The first bid must clear the minimum raise over the sentinel base;
    /// a rejected bid leaves no trace in the state.
    fn test_first_bid_must_clear_base_raise() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        expect_error(
            bid(&mut host, ALICE, RAISE_1 - 1, 10, &mut logger),
            CustomContractError::BidTooLow,
            "Bid below the minimum raise should fail",
        );
        claim_eq!(host.state().viewable_state.highest_bid, None);
        claim!(host.state().history.is_empty());
        claim!(host.state().bidders.is_empty());
        claim_eq!(deposit_of(&host, &ALICE), None);

        bid(&mut host, ALICE, RAISE_1, 10, &mut logger).expect("Bidding should pass");
        let expected = Bid {
            bidder: ALICE,
            amount: Amount::from_micro_ccd(RAISE_1),
        };
        claim_eq!(host.state().viewable_state.highest_bid, Some(expected));
        claim_eq!(host.state().history, vec![expected]);
        claim_eq!(host.state().bidders, vec![ALICE]);
        claim_eq!(deposit_of(&host, &ALICE), Some(Amount::from_micro_ccd(RAISE_1)));
        claim!(logger
            .logs
            .contains(&to_bytes(&CustomEvent::NewBid(NewBidEvent {
                bidder: ALICE,
                amount: Amount::from_micro_ccd(RAISE_1),
            }))));
    }

    #[concordium_test]
    /// Bids of 0 CCD are rejected before the raise check.
    fn test_bid_zero() {
        let parameter_bytes = create_parameter_bytes(&InitParameter {
            base_bid: Amount::zero(),
            ..init_parameter()
        });
        let ctx = parametrized_init_ctx(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = auction_init(&ctx, &mut state_builder).expect("Initialization should pass");
        let mut host = TestHost::new(state, state_builder);
        let mut logger = TestLogger::init();

        expect_error(
            bid(&mut host, ALICE, 0, 10, &mut logger),
            CustomContractError::ZeroAmount,
            "Bidding zero should fail",
        );
    }

    #[concordium_test]
    /// The auction owner may not bid on their own auction.
    fn test_owner_cannot_bid() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        expect_error(
            bid(&mut host, OWNER, RAISE_1, 10, &mut logger),
            CustomContractError::OwnerForbidden,
            "Owner bidding should fail",
        );
    }

    #[concordium_test]
    /// Only account addresses can participate.
    fn test_contract_sender_cannot_bid() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        let mut ctx = new_ctx(OWNER, ALICE, 10);
        ctx.set_sender(Address::Contract(ContractAddress {
            index: 1,
            subindex: 0,
        }));
        expect_error(
            auction_bid(&ctx, &mut host, Amount::from_micro_ccd(RAISE_1), &mut logger),
            CustomContractError::OnlyAccountAddress,
            "Bidding from a contract should fail",
        );
    }

    #[concordium_test]
    /// A bid at the expiry itself is still accepted; one slot later it is
    /// refused.
    fn test_bid_after_expiry() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        expect_error(
            bid(&mut host, ALICE, RAISE_1, AUCTION_END + 1, &mut logger),
            CustomContractError::AuctionFinished,
            "Bidding after the expiry should fail",
        );

        bid(&mut host, ALICE, RAISE_1, AUCTION_END, &mut logger)
            .expect("Bidding at the expiry should pass");
        // A last-moment bid is also a sniping bid: the expiry moves out.
        claim_eq!(expiry_millis(&host), AUCTION_END + WINDOW);
    }

    #[concordium_test]
    /// The expiry is pulled to `slot_time + window` exactly when the
    /// remaining time is within the window; an earlier bid leaves it
    /// alone, and a bid with exactly the window left is a no-op extension.
    fn test_late_bid_extends_expiry() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        bid(&mut host, ALICE, RAISE_1, AUCTION_END - WINDOW - 1, &mut logger)
            .expect("Bidding should pass");
        claim_eq!(expiry_millis(&host), AUCTION_END);

        bid(&mut host, BOB, RAISE_2, AUCTION_END - WINDOW, &mut logger)
            .expect("Bidding should pass");
        claim_eq!(expiry_millis(&host), AUCTION_END);

        bid(&mut host, ALICE, RAISE_3, AUCTION_END - WINDOW + 1, &mut logger)
            .expect("Bidding should pass");
        claim_eq!(expiry_millis(&host), AUCTION_END + 1);
    }

    #[concordium_test]
    /// The leading bid always equals the maximum entry of the bid history,
    /// and an account appears in the bidder set once.
    fn test_highest_bid_tracks_history() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        bid(&mut host, ALICE, RAISE_1, 10, &mut logger).expect("Bidding should pass");
        bid(&mut host, BOB, RAISE_2, 20, &mut logger).expect("Bidding should pass");
        bid(&mut host, ALICE, RAISE_3, 30, &mut logger).expect("Bidding should pass");

        let ctx = new_ctx(OWNER, ALICE, 40);
        let history = auction_view_bids(&ctx, &host).expect("Viewing bids should pass");
        claim_eq!(history.len(), 3);
        let maximum = history
            .iter()
            .max_by_key(|bid| bid.amount)
            .copied()
            .expect("History should not be empty");
        let highest =
            auction_view_highest_bid(&ctx, &host).expect("Viewing the highest bid should pass");
        claim_eq!(highest, Some(maximum));

        claim_eq!(host.state().bidders, vec![ALICE, BOB]);
        // Alice's escrow is the sum of both her bids.
        claim_eq!(
            deposit_of(&host, &ALICE),
            Some(Amount::from_micro_ccd(RAISE_1 + RAISE_3))
        );
    }

    #[concordium_test]
    /// An outbid account withdraws its full escrow; a second withdrawal
    /// finds nothing.
    fn test_withdraw_by_outbid_bidder_returns_full() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        bid(&mut host, ALICE, RAISE_1, 10, &mut logger).expect("Bidding should pass");
        bid(&mut host, BOB, RAISE_2, 20, &mut logger).expect("Bidding should pass");

        host.set_self_balance(Amount::from_micro_ccd(RAISE_1 + RAISE_2));
        withdraw(&mut host, ALICE, 30, &mut logger).expect("Withdrawal should pass");

        claim_eq!(host.self_balance(), Amount::from_micro_ccd(RAISE_2));
        claim_eq!(deposit_of(&host, &ALICE), Some(Amount::zero()));
        claim!(logger
            .logs
            .contains(&to_bytes(&CustomEvent::BidsRetrieve(BidsRetrieveEvent {
                account: ALICE,
                amount: Amount::from_micro_ccd(RAISE_1),
            }))));

        expect_error(
            withdraw(&mut host, ALICE, 40, &mut logger),
            CustomContractError::NothingToWithdraw,
            "Withdrawing an empty escrow should fail",
        );
    }

    #[concordium_test]
    /// The leading account can only withdraw the surplus above its own
    /// leading offer; with nothing above it, there is nothing to withdraw.
    fn test_withdraw_by_leader_returns_surplus_only() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        bid(&mut host, ALICE, RAISE_1, 10, &mut logger).expect("Bidding should pass");
        host.set_self_balance(Amount::from_micro_ccd(RAISE_1));
        expect_error(
            withdraw(&mut host, ALICE, 20, &mut logger),
            CustomContractError::NothingToWithdraw,
            "The leading offer itself should stay locked",
        );

        // Alice raises her own offer; the earlier bid becomes surplus.
        bid(&mut host, ALICE, RAISE_2, 30, &mut logger).expect("Bidding should pass");
        host.set_self_balance(Amount::from_micro_ccd(RAISE_1 + RAISE_2));
        withdraw(&mut host, ALICE, 40, &mut logger).expect("Withdrawal should pass");

        claim_eq!(host.self_balance(), Amount::from_micro_ccd(RAISE_2));
        claim_eq!(deposit_of(&host, &ALICE), Some(Amount::zero()));
        claim_eq!(
            host.state().viewable_state.highest_bid,
            Some(Bid {
                bidder: ALICE,
                amount: Amount::from_micro_ccd(RAISE_2),
            })
        );
    }

    #[concordium_test]
    /// A failed transfer rejects the whole withdrawal instead of burning
    /// the recorded entitlement.
    fn test_withdraw_transfer_failure_rejects() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        bid(&mut host, ALICE, RAISE_1, 10, &mut logger).expect("Bidding should pass");
        bid(&mut host, BOB, RAISE_2, 20, &mut logger).expect("Bidding should pass");

        host.set_self_balance(Amount::zero());
        expect_error(
            withdraw(&mut host, ALICE, 30, &mut logger),
            CustomContractError::InvokeTransferError,
            "Withdrawal should fail when the transfer fails",
        );
    }

    #[concordium_test]
    /// An account that fully withdrew and then bids again is not counted
    /// as a new member of the bidder set.
    fn test_rebid_after_full_withdrawal() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        bid(&mut host, ALICE, RAISE_1, 10, &mut logger).expect("Bidding should pass");
        bid(&mut host, BOB, RAISE_2, 20, &mut logger).expect("Bidding should pass");
        host.set_self_balance(Amount::from_micro_ccd(RAISE_1 + RAISE_2));
        withdraw(&mut host, ALICE, 30, &mut logger).expect("Withdrawal should pass");

        bid(&mut host, ALICE, RAISE_3, 40, &mut logger).expect("Bidding should pass");
        claim_eq!(host.state().bidders, vec![ALICE, BOB]);
        claim_eq!(deposit_of(&host, &ALICE), Some(Amount::from_micro_ccd(RAISE_3)));
    }

    #[concordium_test]
    /// Closing is owner-only and gates every operation that requires an
    /// open auction from the next slot time on.
    fn test_close_gates_operations() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        let alice_ctx = new_ctx(OWNER, ALICE, 1_000);
        expect_error(
            auction_close(&alice_ctx, &mut host, &mut logger),
            CustomContractError::Unauthorized,
            "Closing by a non-owner should fail",
        );

        let owner_ctx = new_ctx(OWNER, OWNER, 1_000);
        auction_close(&owner_ctx, &mut host, &mut logger).expect("Closing should pass");
        claim_eq!(expiry_millis(&host), 1_000);
        claim!(logger.logs.contains(&to_bytes(&CustomEvent::AuctionFinished(
            Timestamp::from_timestamp_millis(1_000)
        ))));

        expect_error(
            bid(&mut host, ALICE, RAISE_1, 1_001, &mut logger),
            CustomContractError::AuctionFinished,
            "Bidding after the close should fail",
        );
        expect_error(
            withdraw(&mut host, ALICE, 1_001, &mut logger),
            CustomContractError::AuctionFinished,
            "Withdrawing after the close should fail",
        );

        let view_ctx = new_ctx(OWNER, ALICE, 1_001);
        let winner = auction_view_winner(&view_ctx, &host).expect("Viewing the winner should pass");
        claim_eq!(winner, None);
    }

    #[concordium_test]
    /// Settlement is owner-only and requires the auction to be over.
    fn test_refund_losers_gates() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        bid(&mut host, ALICE, RAISE_1, 10, &mut logger).expect("Bidding should pass");

        expect_error(
            refund_losers(&mut host, ALICE, 0, 10, AUCTION_END + 1, &mut logger),
            CustomContractError::Unauthorized,
            "Settling by a non-owner should fail",
        );
        expect_error(
            refund_losers(&mut host, OWNER, 0, 10, AUCTION_END, &mut logger),
            CustomContractError::AuctionStillActive,
            "Settling at the expiry itself should fail",
        );
        expect_error(
            refund_losers(&mut host, OWNER, 0, 10, 500, &mut logger),
            CustomContractError::AuctionStillActive,
            "Settling an open auction should fail",
        );
    }

    #[concordium_test]
    /// A sequence of bids, an early close and a settlement:
    /// 0. Auction starts with the sentinel base in place.
    /// 1. Alice clears the base raise, becomes the leading bidder.
    /// 2. Bob's bid below the minimum raise over Alice is rejected with no
    /// state change. 3. Bob's raised bid is accepted and leads. 4. The
    /// owner closes early and settles: Alice gets her escrow back minus
    /// the commission, the winning offer and the commission go to the
    /// owner, and Bob receives nothing through this path. 5. Settling the
    /// same page again moves no funds.
    fn test_auction_bid_close_and_refund() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        bid(&mut host, ALICE, RAISE_1, 10, &mut logger).expect("Bidding should pass");

        expect_error(
            bid(&mut host, BOB, RAISE_2 - 1, 20, &mut logger),
            CustomContractError::BidTooLow,
            "Bid below the minimum raise should fail",
        );
        claim_eq!(deposit_of(&host, &BOB), None);

        bid(&mut host, BOB, RAISE_2, 30, &mut logger).expect("Bidding should pass");
        claim_eq!(
            host.state().viewable_state.highest_bid,
            Some(Bid {
                bidder: BOB,
                amount: Amount::from_micro_ccd(RAISE_2),
            })
        );

        let owner_ctx = new_ctx(OWNER, OWNER, 100);
        auction_close(&owner_ctx, &mut host, &mut logger).expect("Closing should pass");

        host.set_self_balance(Amount::from_micro_ccd(RAISE_1 + RAISE_2));
        let mut refund_logger = TestLogger::init();
        refund_losers(&mut host, OWNER, 0, 10, 101, &mut refund_logger)
            .expect("Settlement should pass");

        // Alice's escrow minus 5% commission; the rest went to the owner.
        let alice_net = RAISE_1 - RAISE_1 * COMMISSION / 100;
        claim_eq!(host.self_balance(), Amount::zero());
        claim_eq!(deposit_of(&host, &ALICE), Some(Amount::zero()));
        claim_eq!(deposit_of(&host, &BOB), Some(Amount::zero()));
        claim_eq!(refund_logger.logs.len(), 1);
        claim!(refund_logger.logs.contains(&to_bytes(
            &CustomEvent::BidsRetrieve(BidsRetrieveEvent {
                account: ALICE,
                amount: Amount::from_micro_ccd(alice_net),
            })
        )));

        // The winner is visible after the end.
        let view_ctx = new_ctx(OWNER, ALICE, 101);
        let winner = auction_view_winner(&view_ctx, &host).expect("Viewing the winner should pass");
        claim_eq!(
            winner,
            Some(Bid {
                bidder: BOB,
                amount: Amount::from_micro_ccd(RAISE_2),
            })
        );

        // Settled escrows stay settled.
        host.set_self_balance(Amount::from_micro_ccd(500));
        let mut rerun_logger = TestLogger::init();
        refund_losers(&mut host, OWNER, 0, 10, 102, &mut rerun_logger)
            .expect("Settlement should pass");
        claim_eq!(host.self_balance(), Amount::from_micro_ccd(500));
        claim!(rerun_logger.logs.is_empty());
    }

    #[concordium_test]
    /// Settlement processes the bidder set in insertion order, one page at
    /// a time; a page past the end of the set is a no-op.
    fn test_refund_losers_pagination() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        bid(&mut host, ALICE, RAISE_1, 10, &mut logger).expect("Bidding should pass");
        bid(&mut host, BOB, RAISE_2, 20, &mut logger).expect("Bidding should pass");
        bid(&mut host, CAROL, RAISE_3, 30, &mut logger).expect("Bidding should pass");

        let owner_ctx = new_ctx(OWNER, OWNER, 100);
        auction_close(&owner_ctx, &mut host, &mut logger).expect("Closing should pass");
        host.set_self_balance(Amount::from_micro_ccd(RAISE_1 + RAISE_2 + RAISE_3));

        // First page: only Alice is settled.
        refund_losers(&mut host, OWNER, 0, 1, 101, &mut logger).expect("Settlement should pass");
        claim_eq!(deposit_of(&host, &ALICE), Some(Amount::zero()));
        claim_eq!(
            deposit_of(&host, &BOB),
            Some(Amount::from_micro_ccd(RAISE_2))
        );
        claim_eq!(
            host.self_balance(),
            Amount::from_micro_ccd(RAISE_2 + RAISE_3)
        );

        // Second page: Bob is refunded, Carol's winning offer goes to the
        // owner along with the commission.
        refund_losers(&mut host, OWNER, 1, 5, 102, &mut logger).expect("Settlement should pass");
        claim_eq!(deposit_of(&host, &BOB), Some(Amount::zero()));
        claim_eq!(deposit_of(&host, &CAROL), Some(Amount::zero()));
        claim_eq!(host.self_balance(), Amount::zero());

        refund_losers(&mut host, OWNER, 5, 5, 103, &mut logger).expect("Settlement should pass");
        claim_eq!(host.self_balance(), Amount::zero());
    }

    #[concordium_test]
    /// The winner is hidden while the auction is open and `None` if the
    /// sentinel was never outbid.
    fn test_view_winner_gated() {
        let host = fresh_host();

        let open_ctx = new_ctx(OWNER, ALICE, AUCTION_END);
        expect_error(
            auction_view_winner(&open_ctx, &host),
            CustomContractError::AuctionStillActive,
            "Viewing the winner of an open auction should fail",
        );

        let closed_ctx = new_ctx(OWNER, ALICE, AUCTION_END + 1);
        let winner =
            auction_view_winner(&closed_ctx, &host).expect("Viewing the winner should pass");
        claim_eq!(winner, None);
    }
}
