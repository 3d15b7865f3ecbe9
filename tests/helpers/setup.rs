use bookclub_api::Application;
use bookclub_infra::BookclubContext;
use bookclub_sdk::BookclubSDK;

pub struct TestApp {
    /// Shares its repositories with the running application, used for seeding
    pub ctx: BookclubContext,
    pub address: String,
}

impl TestApp {
    /// SDK acting on behalf of the owner of the given auth token
    pub fn sdk(&self, auth_token: &str) -> BookclubSDK {
        BookclubSDK::new(self.address.clone(), Some(auth_token.to_string()))
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, BookclubSDK) {
    let mut ctx = BookclubContext::create_inmemory();
    ctx.config.port = 0; // Random port

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = BookclubSDK::new(address.clone(), None);
    (TestApp { ctx, address }, sdk)
}
