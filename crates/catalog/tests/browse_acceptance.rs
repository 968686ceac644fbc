use catalog::{BrowseCriteria, Catalog, EventFilter, PriceFilter, SortBy};
use shared::domain::{EventCategory, EventStatus};

#[test]
fn listing_page_flow_narrows_then_resets() {
    let catalog = Catalog::bundled().expect("catalog");
    let mut criteria = BrowseCriteria::default();
    let everything = catalog.browse(&criteria).len();

    criteria.filter.toggle_category(EventCategory::Music);
    criteria.filter.toggle_category(EventCategory::Art);
    criteria.filter.price = PriceFilter::Paid;
    criteria.sort_by = SortBy::Price;
    let narrowed = catalog.browse(&criteria);
    let titles: Vec<&str> = narrowed.iter().map(|event| event.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Festival Panafricain de Musique", "Concert de Rumba Congolaise"]
    );
    assert_eq!(criteria.filter.active_count(), 2);

    criteria.filter.search = "rumba".into();
    assert_eq!(catalog.browse(&criteria).len(), 1);

    criteria.filter.location = "Ouesso".into();
    assert!(catalog.browse(&criteria).is_empty());

    criteria.reset();
    assert_eq!(catalog.browse(&criteria).len(), everything);
}

#[test]
fn every_sort_keeps_the_filtered_set() {
    let catalog = Catalog::bundled().expect("catalog");
    let filter = EventFilter::default().with_status(EventStatus::Upcoming);

    let mut reference: Vec<String> = catalog
        .browse(&BrowseCriteria::new(filter.clone(), SortBy::Date))
        .iter()
        .map(|event| event.id.0.clone())
        .collect();
    reference.sort();

    for sort_by in [SortBy::Date, SortBy::Popularity, SortBy::Price] {
        let mut ids: Vec<String> = catalog
            .browse(&BrowseCriteria::new(filter.clone(), sort_by))
            .iter()
            .map(|event| event.id.0.clone())
            .collect();
        ids.sort();
        assert_eq!(ids, reference, "sort {sort_by} changed membership");
    }
}

#[test]
fn excluded_categories_never_appear() {
    let catalog = Catalog::bundled().expect("catalog");
    for selected in EventCategory::ALL {
        let criteria = BrowseCriteria::new(
            EventFilter::default().with_category(*selected),
            SortBy::Popularity,
        );
        let listed = catalog.browse(&criteria);
        assert!(listed.iter().all(|event| event.category == *selected));
        assert!(listed
            .windows(2)
            .all(|w| w[0].registered_count >= w[1].registered_count));
    }
}
