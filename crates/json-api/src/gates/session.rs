//! Session key hoop.

use salvo::prelude::*;
use storefront_app::sessions::SessionKey;
use tracing::debug;

use crate::extensions::*;

/// Resolve the cookie's page-state key, minting one for new browsers, and
/// inject it into the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let key = match depot.cookie_session_key() {
        Some(key) => key,
        None => {
            let key = SessionKey::new();

            if let Err(error) = depot.set_cookie_session_key(key) {
                res.render(error);
                ctrl.skip_rest();

                return;
            }

            debug!(session = %key, "started new session");

            key
        }
    };

    depot.inject(key);

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use salvo::{
        session::{CookieStore, SessionHandler},
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[salvo::handler]
    async fn echo_key(depot: &mut Depot, res: &mut Response) {
        let key = depot
            .session_key_or_500()
            .map_or_else(|_| "missing".to_string(), |key| key.to_string());

        res.render(key);
    }

    fn make_service() -> TestResult<Service> {
        let sessions = SessionHandler::builder(CookieStore::new(), &[7; 64]).build()?;

        Ok(Service::new(
            Router::new()
                .hoop(sessions)
                .hoop(handler)
                .push(Router::new().get(echo_key)),
        ))
    }

    #[tokio::test]
    async fn test_new_browser_gets_a_session_key_and_cookie() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .send(&make_service()?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            res.headers().contains_key("set-cookie"),
            "expected a session cookie"
        );

        let key = res.take_string().await?;

        assert!(key.parse::<uuid::Uuid>().is_ok(), "expected a uuid, got {key}");

        Ok(())
    }
}
