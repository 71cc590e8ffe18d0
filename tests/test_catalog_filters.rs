use rasoi::{collect_tags, filter, App, AppConfig, Catalog, Recipe};

fn seed() -> Catalog {
    Catalog::with_seed_recipes().unwrap()
}

fn matches(recipe: &Recipe, search: &str, tag: &str) -> bool {
    let needle = search.to_lowercase();
    (search.is_empty()
        || recipe.title.to_lowercase().contains(&needle)
        || recipe.description.to_lowercase().contains(&needle))
        && (tag.is_empty() || recipe.tags.iter().any(|t| t == tag))
}

#[test]
fn test_filter_returns_exact_matching_subset_in_order() {
    let catalog = seed();
    let recipes = catalog.recipes();
    let mut searches = vec!["", "chicken", "TOMATO", "a", "zzz", "cream"];
    let tags = collect_tags(recipes);
    let mut tag_options: Vec<&str> = tags.iter().map(String::as_str).collect();
    tag_options.push("");
    tag_options.push("Nonexistent");
    searches.dedup();

    for search in &searches {
        for tag in &tag_options {
            let expected: Vec<u32> = recipes
                .iter()
                .filter(|r| matches(r, search, tag))
                .map(|r| r.id)
                .collect();
            let actual: Vec<u32> = filter(recipes, search, tag).iter().map(|r| r.id).collect();
            assert_eq!(actual, expected, "search={:?} tag={:?}", search, tag);
        }
    }
}

#[test]
fn test_tags_sorted_without_duplicates() {
    let tags = seed().tags();
    let mut sorted = tags.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(tags, sorted);
    assert!(tags.contains(&"Vegetarian".to_string()));
}

#[test]
fn test_app_filters_follow_view_state() {
    let mut app = App::new(AppConfig::default()).unwrap();
    let all = app.filtered_recipes().len();
    assert_eq!(all, app.catalog().len());

    app.set_tag_filter("Quick");
    let quick: Vec<u32> = app.filtered_recipes().iter().map(|r| r.id).collect();
    assert_eq!(quick, vec![2, 3, 6]);

    app.set_search_term("tea");
    let tea: Vec<u32> = app.filtered_recipes().iter().map(|r| r.id).collect();
    assert_eq!(tea, vec![3]);

    app.set_tag_filter("");
    app.set_search_term("");
    assert_eq!(app.filtered_recipes().len(), all);
}

#[test]
fn test_unknown_recipe_cannot_be_selected() {
    let mut app = App::new(AppConfig::default()).unwrap();
    assert!(app.select_recipe(42).is_err());
    assert!(app.view().selected_recipe().is_none());
}
