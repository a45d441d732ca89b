pub mod auth;
pub mod dashboard;
pub mod error;
pub mod home;
pub mod map;
pub mod schools;

pub use auth::AuthPage;
pub use dashboard::DashboardPage;
pub use error::ErrorPage;
pub use home::HomePage;
pub use map::MapPage;
pub use schools::SchoolsPage;
