use std::sync::Arc;

use crate::core::client::backend_client::BackendClient;
use crate::core::config::Config;
use crate::core::state::session::session_state::SessionState;
use crate::domain::alarm::service::alarm_table_service::AlarmTableService;
use crate::domain::auth::service::auth_service::AuthService;
use crate::domain::dashboard::service::dashboard_kpi_service::DashboardKpiService;
use crate::domain::device::service::device_mngt_service::DeviceMngtService;
use crate::domain::history::service::history_table_service::HistoryTableService;
use crate::domain::plant::service::plant_service::PlantService;
use crate::domain::user::service::user_mngt_service::UserMngtService;

/// One shared handle per service, wired to one backend client and one
/// session. Cloning the state clones the handles, not the services.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionState>,
    pub auth_service: Arc<AuthService>,
    pub alarm_service: Arc<AlarmTableService>,
    pub history_service: Arc<HistoryTableService>,
    pub device_service: Arc<DeviceMngtService>,
    pub user_service: Arc<UserMngtService>,
    pub plant_service: Arc<PlantService>,
    pub dashboard_service: Arc<DashboardKpiService>,
}

pub fn build_app_state(config: &Config) -> AppState {
    let client = Arc::new(BackendClient::new(&config.api_base));
    let session = SessionState::new().shared();

    AppState {
        session: session.clone(),
        auth_service: Arc::new(AuthService::new(client.clone(), session)),
        alarm_service: Arc::new(AlarmTableService::new(client.clone())),
        history_service: Arc::new(HistoryTableService::new(client.clone(), config.bucket_sec)),
        device_service: Arc::new(DeviceMngtService::new(client.clone())),
        user_service: Arc::new(UserMngtService::new(client.clone())),
        plant_service: Arc::new(PlantService::new(client.clone())),
        dashboard_service: Arc::new(DashboardKpiService::new(client)),
    }
}
