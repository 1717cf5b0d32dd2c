use vet_clinic::controller::{ControllerError, ListController, Mutation, SpeciesResource};
use vet_clinic::domain::species::{FILTER_SEARCH, SpeciesStatus};
use vet_clinic::domain::types::SpeciesId;
use vet_clinic::forms::species::SpeciesForm;
use vet_clinic::pagination::ListQuery;

mod common;

use common::{FakeSpeciesApi, species};

type SpeciesController = ListController<SpeciesResource<FakeSpeciesApi>>;

fn controller(api: FakeSpeciesApi, page_size: usize) -> SpeciesController {
    ListController::new(SpeciesResource::new(api), page_size)
}

fn api(controller: &SpeciesController) -> &FakeSpeciesApi {
    controller.gateway().inner()
}

#[tokio::test]
async fn test_pages_never_exceed_page_size() {
    let controller = controller(FakeSpeciesApi::seeded(23), 10);

    for page in 1..=3 {
        let loaded = controller.set_page(page).await.unwrap();
        assert!(loaded.items.len() <= 10);
        assert_eq!(loaded.total_count, 23);
    }
    assert_eq!(controller.page().unwrap().items.len(), 3);
}

#[tokio::test]
async fn test_oversized_server_page_is_truncated() {
    let fake = FakeSpeciesApi::seeded(15);
    fake.ignore_page_size();
    let controller = controller(fake, 5);

    let loaded = controller.load(ListQuery::new(5)).await.unwrap();

    assert_eq!(loaded.items.len(), 5);
    assert_eq!(loaded.total_count, 15);
}

#[tokio::test]
async fn test_invalid_query_makes_no_call() {
    let controller = controller(FakeSpeciesApi::seeded(3), 10);

    let err = controller.load(ListQuery::new(10).page(0)).await.unwrap_err();

    assert!(matches!(err, ControllerError::InvalidQuery));
    assert_eq!(api(&controller).list_calls(), 0);
    assert!(controller.list_status().error.is_some());
}

#[tokio::test]
async fn test_filter_change_resets_page() {
    let list = (1..=30)
        .map(|id| {
            let name = if id % 2 == 0 { "Felino" } else { "Canino" };
            species(id, &format!("{name} {id}"))
        })
        .collect();
    let controller = controller(FakeSpeciesApi::with_species(list), 5);

    controller.set_page(3).await.unwrap();
    assert_eq!(controller.query().page, 3);

    let filtered = controller.set_filter(FILTER_SEARCH, "felino").await.unwrap();

    assert_eq!(filtered.page, 1);
    assert_eq!(filtered.total_count, 15);
    assert_eq!(controller.query().filter_value(FILTER_SEARCH), Some("felino"));

    let cleared = controller.set_filter(FILTER_SEARCH, "  ").await.unwrap();
    assert_eq!(cleared.total_count, 30);
    assert!(!controller.query().has_filters());
}

#[tokio::test]
async fn test_clear_filter_drops_key_and_resets_page() {
    let list = (1..=20)
        .map(|id| {
            let name = if id <= 8 { "Felino" } else { "Canino" };
            species(id, &format!("{name} {id}"))
        })
        .collect();
    let controller = controller(FakeSpeciesApi::with_species(list), 3);
    controller.set_filter(FILTER_SEARCH, "canino").await.unwrap();
    controller.set_page(2).await.unwrap();

    let cleared = controller.clear_filter(FILTER_SEARCH).await.unwrap();

    assert_eq!(cleared.page, 1);
    assert_eq!(cleared.total_count, 20);
    assert_eq!(controller.query().filter_value(FILTER_SEARCH), None);
    assert_eq!(controller.query().page, 1);
}

#[tokio::test]
async fn test_page_size_change_resets_page() {
    let controller = controller(FakeSpeciesApi::seeded(40), 10);
    controller.set_page(3).await.unwrap();

    let resized = controller.set_page_size(5).await.unwrap();

    assert_eq!(resized.page, 1);
    assert_eq!(resized.page_size, 5);
    assert!(resized.items.len() <= 5);
    assert_eq!(resized.items.first().map(|s| s.id.get()), Some(1));
    let query = controller.query();
    assert_eq!((query.page, query.page_size), (1, 5));
}

#[tokio::test]
async fn test_failed_load_keeps_previous_page() {
    let controller = controller(FakeSpeciesApi::seeded(12), 10);
    let first = controller.refresh().await.unwrap();

    api(&controller).fail_lists(true);
    let err = controller.set_page(2).await.unwrap_err();

    assert_eq!(err.user_message(), Some("Error al obtener especies paginadas"));
    assert_eq!(controller.page(), Some(first));
    let status = controller.list_status();
    assert!(!status.loading);
    assert_eq!(status.error.as_deref(), Some("Error al obtener especies paginadas"));
}

#[tokio::test]
async fn test_mutation_refetches_same_query() {
    let controller = controller(FakeSpeciesApi::seeded(4), 10);
    controller.refresh().await.unwrap();
    let calls_before = api(&controller).list_calls();

    controller
        .create_from(SpeciesForm {
            name: "Ave".into(),
            description: "Loros y canarios".into(),
        })
        .await
        .unwrap();

    assert_eq!(api(&controller).mutation_calls(), 1);
    assert_eq!(api(&controller).list_calls(), calls_before + 1);
    let page = controller.page().unwrap();
    assert_eq!(page.total_count, 5);
    assert!(page.items.iter().any(|s| s.name == "Ave"));
}

#[tokio::test]
async fn test_toggle_flips_status_after_refresh() {
    let controller = controller(FakeSpeciesApi::seeded(8), 10);
    controller.refresh().await.unwrap();

    controller
        .mutate(Mutation::ToggleStatus(SpeciesId::new(5).unwrap()))
        .await
        .unwrap();

    let page = controller.page().unwrap();
    let toggled = page.items.iter().find(|s| s.id.get() == 5).unwrap();
    assert_eq!(toggled.status, SpeciesStatus::Inactive);
    assert_eq!(api(&controller).status_of(5), Some(SpeciesStatus::Inactive));
}

#[tokio::test]
async fn test_delete_then_refetch_drops_row() {
    let controller = controller(FakeSpeciesApi::seeded(3), 10);

    controller
        .mutate(Mutation::Delete(SpeciesId::new(2).unwrap()))
        .await
        .unwrap();

    let ids: Vec<i32> = controller.page().unwrap().items.iter().map(|s| s.id.get()).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_blank_name_never_reaches_api() {
    let controller = controller(FakeSpeciesApi::seeded(2), 10);

    let err = controller
        .create_from(SpeciesForm {
            name: "   ".into(),
            description: String::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ControllerError::Form(_)));
    assert_eq!(api(&controller).mutation_calls(), 0);
    assert_eq!(api(&controller).list_calls(), 0);
    let status = controller.mutation_status();
    assert_eq!(status.field_errors.get("name"), Some("El nombre es requerido"));
    assert!(status.error.is_none());
}

#[tokio::test]
async fn test_failed_mutation_surfaces_server_message() {
    let controller = controller(FakeSpeciesApi::seeded(2), 10);

    let err = controller
        .mutate(Mutation::ToggleStatus(SpeciesId::new(40).unwrap()))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), Some("Especie no encontrada"));
    assert_eq!(
        controller.mutation_status().error.as_deref(),
        Some("Especie no encontrada")
    );
    assert_eq!(api(&controller).list_calls(), 0);
}

#[tokio::test]
async fn test_refresh_failure_after_mutation_is_not_a_mutation_failure() {
    let controller = controller(FakeSpeciesApi::seeded(2), 10);
    api(&controller).fail_lists(true);

    controller
        .mutate(Mutation::Delete(SpeciesId::new(1).unwrap()))
        .await
        .unwrap();

    assert!(controller.mutation_status().error.is_none());
    assert!(controller.list_status().error.is_some());
}

#[tokio::test]
async fn test_stale_response_does_not_overwrite_newer_query() {
    let list = vec![species(1, "Gato"), species(2, "Perro"), species(3, "Perico")];
    let fake = FakeSpeciesApi::with_species(list);
    let (release, held) = tokio::sync::oneshot::channel();
    fake.hold_search("gato", held);
    let controller = controller(fake, 10);

    let (slow, fast) = tokio::join!(
        controller.set_filter(FILTER_SEARCH, "gato"),
        async {
            let page = controller.set_filter(FILTER_SEARCH, "per").await;
            release.send(()).unwrap();
            page
        }
    );

    assert!(matches!(slow, Err(ControllerError::Superseded)));
    assert_eq!(fast.unwrap().total_count, 2);
    let held_page = controller.page().unwrap();
    assert_eq!(held_page.total_count, 2);
    assert!(held_page.items.iter().all(|s| s.name.starts_with("Per")));
    assert_eq!(controller.query().filter_value(FILTER_SEARCH), Some("per"));
}

#[tokio::test]
async fn test_refresh_in_flight_during_toggle_does_not_revert_page() {
    let fake = FakeSpeciesApi::seeded(8);
    let (release, held) = tokio::sync::oneshot::channel();
    fake.hold_next_list(held);
    let controller = controller(fake, 10);
    let target = SpeciesId::new(5).unwrap();

    let (slow, toggled) = tokio::join!(controller.refresh(), async {
        let result = controller.mutate(Mutation::ToggleStatus(target)).await;
        release.send(()).unwrap();
        result
    });

    assert!(matches!(slow, Err(ControllerError::Superseded)));
    toggled.unwrap();
    let page = controller.page().unwrap();
    let row = page.items.iter().find(|s| s.id == target).unwrap();
    assert_eq!(row.status, SpeciesStatus::Inactive);
    assert_eq!(api(&controller).status_of(5), Some(SpeciesStatus::Inactive));
    assert!(!controller.list_status().loading);
}
