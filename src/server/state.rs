use std::collections::HashMap;
use std::sync::Arc;
use log::info;
use tokio::sync::{Mutex, RwLock};
use crate::server::model::dish::{Category, DishId, DishRef, Menu};
use crate::server::model::order::TableId;
use crate::server::session::OrderingSession;
use crate::server::upstream::{Backend, UpstreamError};

pub(crate) type SharedSession = Arc<Mutex<OrderingSession>>;

pub(crate) struct AppState<B: Backend> {
    backend: B,
    /// one session per table, loaded from the backend on first use
    sessions: Mutex<HashMap<TableId, SharedSession>>,
    menu: RwLock<Option<Arc<Menu>>>,
}

impl<B: Backend> AppState<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sessions: Mutex::new(HashMap::new()),
            menu: RwLock::new(None),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The table's session, loaded outside the map lock on first use.
    /// When two first loads race, the one inserted first is kept.
    pub async fn session(&self, table_id: TableId) -> Result<SharedSession, UpstreamError> {
        if let Some(session) = self.sessions.lock().await.get(&table_id) {
            return Ok(session.clone());
        }
        let loaded = OrderingSession::load(table_id, &self.backend).await?;
        let mut sessions = self.sessions.lock().await;
        Ok(sessions
            .entry(table_id)
            .or_insert_with(|| Arc::new(Mutex::new(loaded)))
            .clone())
    }

    /// Sessions loaded so far, ordered by table.
    pub async fn sessions(&self) -> Vec<SharedSession> {
        let sessions = self.sessions.lock().await;
        let mut tables = sessions.iter().collect::<Vec<_>>();
        tables.sort_by_key(|(id, _)| **id);
        tables.into_iter().map(|(_, s)| s.clone()).collect()
    }

    /// Fetch the catalog and replace the cached copy.
    pub async fn refresh_menu(&self) -> Result<Arc<Menu>, UpstreamError> {
        let categories = self.backend.fetch_categories().await?;
        let menu = Arc::new(Menu {
            categories: categories.into_iter().map(Category::from).collect(),
        });
        info!("menu refreshed, categories={}", menu.categories.len());
        *self.menu.write().await = Some(menu.clone());
        Ok(menu)
    }

    /// Look a dish up in the cached catalog, refetching once when it is unknown.
    pub async fn find_dish(&self, dish_id: DishId) -> Result<Option<DishRef>, UpstreamError> {
        if let Some(menu) = self.menu.read().await.as_ref() {
            if let Some(dish) = menu.find_dish(dish_id) {
                return Ok(Some(dish.clone()));
            }
        }
        Ok(self.refresh_menu().await?.find_dish(dish_id).cloned())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;
    use tokio::time;
    use crate::server::model::dish::{WireCategory, WireDish};
    use crate::server::upstream::MockBackend;

    fn backend_with_menu() -> MockBackend {
        let mut backend = MockBackend::new();
        backend.categories = vec![WireCategory {
            id: 1,
            name_en: Some("Drinks".to_string()),
            name_zh: None,
            name_ko: None,
            name_ja: None,
            children: vec![],
            dishes: vec![WireDish {
                id: 5,
                name_en: Some("Tea".to_string()),
                name_zh: None,
                name_ko: None,
                name_ja: Some("お茶".to_string()),
                description_en: None,
                description_zh: None,
                description_ko: None,
                description_ja: None,
                image_path: None,
                price: 200,
            }],
        }];
        backend
    }

    #[actix_web::test]
    async fn sessions_are_loaded_once_per_table() {
        let state = AppState::new(MockBackend::new());
        let a = state.session(3).await.unwrap();
        let b = state.session(3).await.unwrap();
        state.session(1).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(state.backend().calls().len(), 4);

        let tables = table_ids(&state).await;
        assert_eq!(tables, vec![1, 3]);
    }

    #[actix_web::test]
    async fn slow_first_load_does_not_block_other_tables() {
        let state = AppState::new(MockBackend::new());
        state.session(1).await.unwrap();
        state.backend().fetch_delay.set(Some(Duration::from_millis(50)));

        let (loaded, others) = tokio::join!(state.session(2), async {
            time::sleep(Duration::from_millis(10)).await;
            time::timeout(Duration::from_millis(20), state.sessions()).await
        });
        loaded.unwrap();
        assert_eq!(others.expect("session map stayed locked").len(), 1);
        assert_eq!(table_ids(&state).await, vec![1, 2]);
    }

    #[actix_web::test]
    async fn racing_first_loads_share_one_session() {
        let state = AppState::new(MockBackend::new());
        state.backend().fetch_delay.set(Some(Duration::from_millis(10)));

        let (a, b) = tokio::join!(state.session(5), state.session(5));
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(state.sessions().await.len(), 1);
    }

    async fn table_ids(state: &AppState<MockBackend>) -> Vec<TableId> {
        let mut ids = vec![];
        for session in state.sessions().await {
            ids.push(session.lock().await.table_id());
        }
        ids
    }

    #[actix_web::test]
    async fn dish_lookup_uses_cached_menu() {
        let state = AppState::new(backend_with_menu());
        assert_eq!(state.find_dish(5).await.unwrap().map(|d| d.unit_price), Some(200));
        assert_eq!(state.find_dish(5).await.unwrap().map(|d| d.id), Some(5));
        assert_eq!(state.backend().calls(), vec!["fetch_categories"]);

        // unknown dishes trigger one refetch
        assert!(state.find_dish(6).await.unwrap().is_none());
        assert_eq!(state.backend().calls().len(), 2);
    }
}
