//! Static Philippine location catalog: region -> province -> city
//!
//! Lookups never fail: unknown region ids resolve to the first region and
//! unknown province ids to the region's first province.

use serde::{Deserialize, Serialize};

/// Separator used in display labels
const SEPARATOR: &str = " • ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct City {
    pub label: &'static str,
    /// Query string sent to the weather provider
    pub query: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Province {
    pub id: &'static str,
    pub name: &'static str,
    pub cities: &'static [City],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub id: &'static str,
    pub name: &'static str,
    pub provinces: &'static [Province],
}

impl Region {
    /// Province selected when the region is picked
    #[must_use]
    pub fn first_province(&self) -> &'static Province {
        let provinces: &'static [Province] = self.provinces;
        &provinces[0]
    }
}

const fn city(label: &'static str, query: &'static str) -> City {
    City { label, query }
}

static REGIONS: &[Region] = &[
    Region {
        id: "luzon",
        name: "Luzon",
        provinces: &[
            Province {
                id: "ncr",
                name: "Metro Manila",
                cities: &[
                    city("Manila", "Manila, Metro Manila, Philippines"),
                    city("Quezon City", "Quezon City, Metro Manila, Philippines"),
                    city("Pasig City", "Pasig City, Metro Manila, Philippines"),
                ],
            },
            Province {
                id: "cavite",
                name: "Cavite",
                cities: &[
                    city("Tagaytay City", "Tagaytay City, Cavite, Philippines"),
                    city("Imus City", "Imus City, Cavite, Philippines"),
                ],
            },
        ],
    },
    Region {
        id: "visayas",
        name: "Visayas",
        provinces: &[
            Province {
                id: "negros-occidental",
                name: "Negros Occidental",
                cities: &[
                    city("Bacolod City", "Bacolod City, Negros Occidental, Philippines"),
                    city("Bago City", "Bago City, Negros Occidental, Philippines"),
                    city(
                        "Calero, Bago City",
                        "Calero, Bago City, Negros Occidental, Philippines",
                    ),
                    city("Murcia", "Murcia, Negros Occidental, Philippines"),
                ],
            },
            Province {
                id: "iloilo",
                name: "Iloilo",
                cities: &[city("Iloilo City", "Iloilo City, Iloilo, Philippines")],
            },
            Province {
                id: "cebu",
                name: "Cebu",
                cities: &[
                    city("Cebu City", "Cebu City, Cebu, Philippines"),
                    city("Lapu-Lapu City", "Lapu-Lapu City, Cebu, Philippines"),
                ],
            },
        ],
    },
    Region {
        id: "mindanao",
        name: "Mindanao",
        provinces: &[
            Province {
                id: "davao-del-sur",
                name: "Davao del Sur",
                cities: &[city("Davao City", "Davao City, Davao del Sur, Philippines")],
            },
            Province {
                id: "misamis-oriental",
                name: "Misamis Oriental",
                cities: &[city(
                    "Cagayan de Oro",
                    "Cagayan de Oro, Misamis Oriental, Philippines",
                )],
            },
            Province {
                id: "zamboanga-del-sur",
                name: "Zamboanga del Sur",
                cities: &[city(
                    "Zamboanga City",
                    "Zamboanga City, Zamboanga del Sur, Philippines",
                )],
            },
        ],
    },
];

pub const DEFAULT_REGION: &str = "visayas";
pub const DEFAULT_PROVINCE: &str = "negros-occidental";
pub const DEFAULT_CITY_QUERY: &str = "Bacolod City, Negros Occidental, Philippines";

#[must_use]
pub fn regions() -> &'static [Region] {
    REGIONS
}

#[must_use]
pub fn region(id: &str) -> &'static Region {
    REGIONS.iter().find(|r| r.id == id).unwrap_or(&REGIONS[0])
}

#[must_use]
pub fn province(region: &'static Region, id: &str) -> &'static Province {
    region
        .provinces
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| region.first_province())
}

/// Cities whose label contains `search`, ignoring case and surrounding space
#[must_use]
pub fn filter_cities(province: &'static Province, search: &str) -> Vec<&'static City> {
    let needle = search.trim().to_lowercase();
    province
        .cities
        .iter()
        .filter(|c| needle.is_empty() || c.label.to_lowercase().contains(&needle))
        .collect()
}

/// The chosen city and how to show it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSelection {
    pub region_id: String,
    pub province_id: String,
    pub query: String,
    /// "City • Province • Region"
    pub display: String,
}

/// Resolve a selection; an unknown city query falls back to the province's first city
#[must_use]
pub fn select(region_id: &str, province_id: &str, city_query: &str) -> LocationSelection {
    let region = region(region_id);
    let province = province(region, province_id);
    let city = province
        .cities
        .iter()
        .find(|c| c.query == city_query)
        .unwrap_or(&province.cities[0]);
    selection(region, province, city)
}

#[must_use]
pub fn default_selection() -> LocationSelection {
    select(DEFAULT_REGION, DEFAULT_PROVINCE, DEFAULT_CITY_QUERY)
}

/// Find the catalog entry for a provider query
#[must_use]
pub fn find_by_query(query: &str) -> Option<LocationSelection> {
    let query = query.trim();
    REGIONS.iter().find_map(|region| {
        region.provinces.iter().find_map(|province| {
            province
                .cities
                .iter()
                .find(|c| c.query.eq_ignore_ascii_case(query))
                .map(|city| selection(region, province, city))
        })
    })
}

/// Display label for a provider query, if it is in the catalog
#[must_use]
pub fn label_for_query(query: &str) -> Option<String> {
    find_by_query(query).map(|s| s.display)
}

/// A selection for any query; uncatalogued queries display as given
#[must_use]
pub fn selection_for_query(query: &str) -> LocationSelection {
    find_by_query(query).unwrap_or_else(|| LocationSelection {
        region_id: String::new(),
        province_id: String::new(),
        query: query.trim().to_string(),
        display: query.trim().to_string(),
    })
}

fn selection(region: &Region, province: &Province, city: &City) -> LocationSelection {
    LocationSelection {
        region_id: region.id.to_string(),
        province_id: province.id.to_string(),
        query: city.query.to_string(),
        display: [city.label, province.name, region.name].join(SEPARATOR),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub id: &'static str,
    pub name: &'static str,
}

/// Everything a location picker needs for one state of its inputs
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub regions: Vec<Choice>,
    pub region: Choice,
    pub provinces: Vec<Choice>,
    pub province: Choice,
    pub cities: Vec<&'static City>,
}

#[must_use]
pub fn catalog_view(region_id: Option<&str>, province_id: Option<&str>, search: Option<&str>) -> CatalogView {
    let region = region(region_id.unwrap_or(DEFAULT_REGION));
    let province = match province_id {
        Some(id) => province(region, id),
        None if region.id == DEFAULT_REGION => province(region, DEFAULT_PROVINCE),
        None => region.first_province(),
    };

    CatalogView {
        regions: REGIONS
            .iter()
            .map(|r| Choice { id: r.id, name: r.name })
            .collect(),
        region: Choice { id: region.id, name: region.name },
        provinces: region
            .provinces
            .iter()
            .map(|p| Choice { id: p.id, name: p.name })
            .collect(),
        province: Choice { id: province.id, name: province.name },
        cities: filter_cities(province, search.unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(regions().len(), 3);
        let provinces: usize = regions().iter().map(|r| r.provinces.len()).sum();
        let cities: usize = regions()
            .iter()
            .flat_map(|r| r.provinces)
            .map(|p| p.cities.len())
            .sum();
        assert_eq!(provinces, 8);
        assert_eq!(cities, 15);
    }

    #[test]
    fn test_default_selection() {
        let selection = default_selection();
        assert_eq!(selection.query, DEFAULT_CITY_QUERY);
        assert_eq!(selection.display, "Bacolod City • Negros Occidental • Visayas");
    }

    #[test]
    fn test_unknown_ids_fall_back() {
        assert_eq!(region("atlantis").id, "luzon");
        assert_eq!(province(region("mindanao"), "nope").id, "davao-del-sur");
    }

    #[rstest]
    #[case("", 4)]
    #[case("  BAGO ", 2)]
    #[case("murc", 1)]
    #[case("manila", 0)]
    fn test_filter_cities(#[case] search: &str, #[case] expected: usize) {
        let negros = province(region("visayas"), "negros-occidental");
        assert_eq!(filter_cities(negros, search).len(), expected);
    }

    #[test]
    fn test_select_unknown_city_uses_first() {
        let selection = select("luzon", "cavite", "Nowhere");
        assert_eq!(selection.query, "Tagaytay City, Cavite, Philippines");
        assert_eq!(selection.display, "Tagaytay City • Cavite • Luzon");
    }

    #[test]
    fn test_label_for_query() {
        assert_eq!(
            label_for_query("Calero, Bago City, Negros Occidental, Philippines").as_deref(),
            Some("Calero, Bago City • Negros Occidental • Visayas")
        );
        assert_eq!(label_for_query("Bacolod,PH"), None);
        assert_eq!(selection_for_query("Bacolod,PH").display, "Bacolod,PH");
    }

    #[test]
    fn test_catalog_view_region_change_resets_province() {
        let view = catalog_view(Some("mindanao"), None, None);
        assert_eq!(view.province.id, "davao-del-sur");
        assert_eq!(view.provinces.len(), 3);

        let view = catalog_view(None, None, Some("city"));
        assert_eq!(view.province.id, "negros-occidental");
        assert_eq!(view.cities.len(), 3);
    }
}
