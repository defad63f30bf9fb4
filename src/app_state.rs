use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::bb8::Pool;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: Pool<AsyncPgConnection>,
    pub config: Config,
}
