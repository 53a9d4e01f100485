use flashcards_core::{
    Card, CollectionError, CollectionService, Group, MemoryRepository, ServiceError,
    DEFAULT_GROUP_NAME,
};

fn setup() -> CollectionService<MemoryRepository> {
    let mut animals = Group::new("Animals");
    animals.cards.push(Card::new("perro", "dog"));
    animals.cards.push(Card::new("gato", "cat"));
    animals.cards.push(Card::new("pez", "fish"));
    let mut colors = Group::new("Colors");
    colors.cards.push(Card::new("rojo", "red"));
    CollectionService::open(MemoryRepository::with_groups(vec![animals, colors]))
}

#[test]
fn deleting_every_group_leaves_exactly_one_default() {
    let mut service = setup();
    service.delete_group().unwrap();
    service.delete_group().unwrap();

    let collection = service.collection();
    assert_eq!(collection.groups().len(), 1);
    assert_eq!(collection.current_group().name, DEFAULT_GROUP_NAME);
    assert!(collection.current_cards().is_empty());
    assert_eq!(service.repository().groups().len(), 1);
}

#[test]
fn delete_card_then_undo_restores_list_in_other_group_context() {
    let mut service = setup();
    let before = service.collection().groups().to_vec();

    let pending = service.delete_card(2).unwrap();
    service.select_group(1).unwrap();
    service.undo_delete(pending.token).unwrap();

    assert_eq!(service.collection().groups(), before.as_slice());
    assert_eq!(service.collection().current_index(), 1);
}

#[test]
fn pause_commits_pending_deletion() {
    let mut service = setup();
    let pending = service.delete_card(0).unwrap();
    service.pause().unwrap();

    assert!(service.pending_deletion().is_none());
    assert!(matches!(
        service.undo_delete(pending.token),
        Err(ServiceError::NoPendingDeletion(_))
    ));
    let saved = &service.repository().groups()[0];
    assert_eq!(saved.cards.len(), 2);
    assert_eq!(saved.cards[0].front, "gato");
}

#[test]
fn duplicate_names_are_rejected_without_flushing() {
    let mut service = setup();
    let err = service.create_group("Colors").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Collection(CollectionError::DuplicateGroupName(ref name)) if name == "Colors"
    ));
    assert!(service.rename_group(" Colors ").is_err());
    assert!(!service.rename_group("Animals").unwrap());
    assert_eq!(service.repository().save_count(), 0);
}

#[test]
fn loaded_duplicate_names_are_kept() {
    let groups = vec![Group::new("Same"), Group::new("Same")];
    let service = CollectionService::open(MemoryRepository::with_groups(groups));
    assert_eq!(
        service.collection().group_names(),
        vec!["Same".to_string(), "Same".to_string()]
    );
}

#[test]
fn edit_card_rejects_blank_text_and_keeps_original() {
    let mut service = setup();
    let err = service.edit_card(0, "  ", "dog").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Collection(CollectionError::EmptyCardText)
    ));
    assert_eq!(
        service.collection().current_cards()[0],
        Card::new("perro", "dog")
    );

    service.edit_card(0, " el perro ", " the dog ").unwrap();
    assert_eq!(
        service.repository().groups()[0].cards[0],
        Card::new("el perro", "the dog")
    );
}

#[test]
fn flip_all_on_empty_group_reports_no_cards() {
    let mut service = setup();
    service.create_group("Fresh").unwrap();
    assert!(matches!(
        service.flip_all(),
        Err(ServiceError::Collection(CollectionError::NoCardsToFlip))
    ));
}
