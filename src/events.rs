use super::*;

/// An untagged event of an accepted bid.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct NewBidEvent {
    /// Account the bid belongs to.
    pub bidder: AccountAddress,
    /// Full value of the new leading offer.
    pub amount: Amount,
}

/// An untagged event of escrowed funds leaving the auction.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct BidsRetrieveEvent {
    /// Account the funds were sent to.
    pub account: AccountAddress,
    /// Amount transferred, after deductions.
    pub amount: Amount,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum CustomEvent {
    /// New leading bid
    NewBid(NewBidEvent),
    /// Escrow returned to a bidder
    BidsRetrieve(BidsRetrieveEvent),
    /// Auction closed by the owner at the carried time
    AuctionFinished(Timestamp),
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::NewBid(event) => {
                out.write_u8(NEW_BID_TAG)?;
                event.serial(out)
            }
            CustomEvent::BidsRetrieve(event) => {
                out.write_u8(BIDS_RETRIEVE_TAG)?;
                event.serial(out)
            }
            CustomEvent::AuctionFinished(event) => {
                out.write_u8(AUCTION_FINISHED_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            NEW_BID_TAG => NewBidEvent::deserial(source).map(CustomEvent::NewBid),
            BIDS_RETRIEVE_TAG => {
                BidsRetrieveEvent::deserial(source).map(CustomEvent::BidsRetrieve)
            }
            AUCTION_FINISHED_TAG => {
                Timestamp::deserial(source).map(CustomEvent::AuctionFinished)
            }
            _ => Err(ParseError::default()),
        }
    }
}
