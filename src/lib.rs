//! # Implementation of an ascending-price auction smart contract
//!
//! To bid, participants send CCD using the bid function. The attached
//! amount is the full value of the new offer and must raise the leading
//! amount by at least 5%. Every accepted bid joins the bidder's escrow;
//! outbid participants can reclaim their escrow with the withdraw
//! function while the auction is open, except for the amount backing
//! their own leading offer.
//!
//! A bid arriving within the extension window of the auction end pushes
//! the end out to `slot_time + window`, so the auction cannot be sniped
//! at the last moment.
//!
//! The owner ends the auction with the close function, at any time. After
//! the end, the owner settles escrowed funds with the refundLosers
//! function, one page of the bidder set per call: losing bidders get
//! their escrow back minus a commission, while the winning offer and the
//! withheld commission go to the owner.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::{constants::*, errors::*, events::*, external::*, state::*};
use concordium_std::*;

mod constants;
mod contract;
mod errors;
mod events;
mod external;
mod state;
