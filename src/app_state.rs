use crate::config::ConfigLoader;
use crate::increase::IncreaseApi;

#[derive(Clone)]
pub struct AppState {
    pub config: ConfigLoader,
    pub increase_api: IncreaseApi,
}
