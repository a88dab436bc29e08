/*
[INPUT]:  Inbound signing requests
[OUTPUT]: Signed results or structured error replies
[POS]:    Dispatch layer - module wiring
[UPDATE]: When adding request kinds or changing the reply contract
*/

pub mod dispatcher;
pub mod request;

pub use dispatcher::RequestDispatcher;
pub use request::WalletRequest;
