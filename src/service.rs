//! Request adapter.
//!
//! Transport layers (HTTP handlers, the CLI) translate their input into a
//! [`Request`], hand it to [`CardService::handle`], and render the
//! [`Reply`]. Errors come back unchanged; [`Error::is_not_found`] lets a
//! caller pick a not-found response.
//!
//! [`Error::is_not_found`]: crate::error::Error::is_not_found

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Card, CardId, CatalogStore};
use crate::collection::CollectionStore;
use crate::core::UserId;
use crate::error::Result;
use crate::packs::{PackOpener, PackOpening};
use crate::search::search_store;

/// A call into the catalog core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    /// Full catalog, in id order.
    ListCatalog,
    GetCard(CardId),
    Search(String),
    /// Open a pack for an authenticated user.
    OpenPack(UserId),
    /// A user's owned cards.
    Collection(UserId),
}

/// Structured result for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    Cards(Vec<Card>),
    Card(Card),
    Pack(PackOpening),
    Collection(Vec<Card>),
}

/// Dispatches requests to the search filter and the pack engine.
#[derive(Debug)]
pub struct CardService<C, S> {
    packs: PackOpener<C, S>,
}

impl<C: CatalogStore, S: CollectionStore> CardService<C, S> {
    #[must_use]
    pub fn new(packs: PackOpener<C, S>) -> Self {
        Self { packs }
    }

    #[must_use]
    pub fn packs(&self) -> &PackOpener<C, S> {
        &self.packs
    }

    pub fn into_inner(self) -> PackOpener<C, S> {
        self.packs
    }

    pub fn handle(&self, request: Request) -> Result<Reply> {
        debug!(?request, "handling request");
        match request {
            Request::ListCatalog => self.list_catalog().map(Reply::Cards),
            Request::GetCard(id) => self.get_card(id).map(Reply::Card),
            Request::Search(query) => self.search(&query).map(Reply::Cards),
            Request::OpenPack(user) => self.open_pack(user).map(Reply::Pack),
            Request::Collection(user) => self.collection(user).map(Reply::Collection),
        }
    }

    pub fn list_catalog(&self) -> Result<Vec<Card>> {
        self.packs.catalog().all()
    }

    pub fn get_card(&self, id: CardId) -> Result<Card> {
        self.packs.catalog().get(id)
    }

    pub fn search(&self, query: &str) -> Result<Vec<Card>> {
        search_store(query, self.packs.catalog())
    }

    pub fn open_pack(&self, user: UserId) -> Result<PackOpening> {
        self.packs.open_pack(user)
    }

    pub fn collection(&self, user: UserId) -> Result<Vec<Card>> {
        self.packs.owned_cards(user)
    }
}
