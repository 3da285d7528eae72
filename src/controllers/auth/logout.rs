use actix_identity::Identity;
use actix_web::{post, web, HttpResponse};

use crate::auth::authenticated_user::AuthenticatedUser;
use crate::i18n::{Language, Message};
use crate::irrigation::Irrigator;
use crate::util::ApiResponse;

/// Ends the login session and everything irrigating under it. The token stops working.
#[post("/logout")]
#[tracing::instrument(skip(identity, irrigator))]
pub async fn logout(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    irrigator: web::Data<Irrigator>,
    language: Language,
) -> HttpResponse {
    irrigator.end_session(&user).await;

    if let Some(identity) = identity {
        identity.logout();
    }

    ApiResponse::ok(Message::LoggedOut.text(language))
}
