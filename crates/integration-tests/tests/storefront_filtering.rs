//! Integration tests for catalog filtering through the storefront.

#![allow(clippy::unwrap_used)]

use eaudumaroc_core::{
    Availability, Category, Criterion, FilterCriteria, Product, Region, WaterColor,
};
use eaudumaroc_storefront::Storefront;
use eaudumaroc_storefront::config::StorefrontConfig;
use eaudumaroc_storefront::events::RecordingSink;
use eaudumaroc_storefront::persistence::MemoryStore;

fn storefront() -> Storefront<MemoryStore, RecordingSink> {
    Storefront::open(
        &StorefrontConfig::default(),
        MemoryStore::new(),
        RecordingSink::new(),
    )
}

fn listed_ids(
    storefront: &mut Storefront<MemoryStore, RecordingSink>,
    criteria: FilterCriteria,
) -> Vec<i32> {
    storefront
        .set_criteria(criteria)
        .iter()
        .map(|p| p.id.as_i32())
        .collect()
}

// =============================================================================
// Single Criterion
// =============================================================================

#[test]
fn test_no_filters_lists_whole_catalog_in_order() {
    let mut storefront = storefront();
    let ids = listed_ids(&mut storefront, FilterCriteria::any());
    assert_eq!(ids, (1..=12).collect::<Vec<_>>());
}

#[test]
fn test_colored_water_only() {
    let mut storefront = storefront();
    let ids = listed_ids(
        &mut storefront,
        FilterCriteria::any().with_water_color(WaterColor::Colored),
    );
    assert_eq!(ids, vec![5, 10, 12]);
}

#[test]
fn test_region_includes_products_sold_everywhere() {
    let mut storefront = storefront();
    let ids = listed_ids(&mut storefront, FilterCriteria::any().with_region(Region::Agadir));
    assert_eq!(ids, vec![3, 5, 6, 8, 10, 12]);
}

// =============================================================================
// Combined Criteria
// =============================================================================

#[test]
fn test_all_three_criteria_combine() {
    let mut storefront = storefront();
    let ids = listed_ids(
        &mut storefront,
        FilterCriteria::any()
            .with_category(Category::Filter)
            .with_water_color(WaterColor::Colored)
            .with_region(Region::Marrakech),
    );
    assert_eq!(ids, vec![10, 12]);
}

#[test]
fn test_no_match_is_empty_not_an_error() {
    let mut storefront = storefront();
    let ids = listed_ids(
        &mut storefront,
        FilterCriteria::any()
            .with_category(Category::OsmosisSystem)
            .with_water_color(WaterColor::Colored),
    );
    assert!(ids.is_empty());
}

#[test]
fn test_criteria_parsed_from_tags() {
    let mut storefront = storefront();
    let criteria = FilterCriteria {
        category: "cartouche".parse().unwrap(),
        water_color: "tous".parse().unwrap(),
        region: "tanger".parse().unwrap(),
    };
    assert!(criteria.water_color.is_any());
    assert_eq!(listed_ids(&mut storefront, criteria), vec![5, 6]);
}

#[test]
fn test_every_combination_is_an_ordered_subset() {
    let mut storefront = storefront();
    let products: Vec<Product> = storefront.catalog().all().to_vec();
    let all: Vec<i32> = products.iter().map(|p| p.id.as_i32()).collect();

    let categories = std::iter::once(Criterion::Any).chain(Category::ALL.map(Criterion::Only));
    for category in categories {
        let waters = std::iter::once(Criterion::Any).chain(WaterColor::ALL.map(Criterion::Only));
        for water_color in waters {
            for region in std::iter::once(Criterion::Any).chain(Region::ALL.map(Criterion::Only)) {
                let ids = listed_ids(
                    &mut storefront,
                    FilterCriteria {
                        category,
                        water_color,
                        region,
                    },
                );
                let mut cursor = all.iter();
                assert!(
                    ids.iter().all(|id| cursor.any(|candidate| candidate == id)),
                    "{category} / {water_color} / {region}: {ids:?}"
                );

                let expected: Vec<i32> = products
                    .iter()
                    .filter(|p| category.value().is_none_or(|c| *c == p.category))
                    .filter(|p| water_color.value().is_none_or(|w| *w == p.water_color))
                    .filter(|p| {
                        region.value().is_none_or(|r| match &p.availability {
                            Availability::Everywhere => true,
                            Availability::Regions(regions) => regions.contains(r),
                        })
                    })
                    .map(|p| p.id.as_i32())
                    .collect();
                assert_eq!(ids, expected, "{category} / {water_color} / {region}");
            }
        }
    }
}
