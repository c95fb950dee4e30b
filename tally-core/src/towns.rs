//! Reference table of towns in the Republic of Ireland.
//!
//! Covers all 26 counties. Distances are approximate road kilometres from
//! Dublin; Dublin itself is the only entry at 0.

use serde::Serialize;

/// A town in the reference table
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Town {
    pub name: &'static str,
    pub county: &'static str,
    pub distance_from_dublin: u32,
}

/// The 26 counties of the Republic of Ireland
pub const COUNTIES: [&str; 26] = [
    "Carlow", "Cavan", "Clare", "Cork", "Donegal", "Dublin", "Galway", "Kerry", "Kildare",
    "Kilkenny", "Laois", "Leitrim", "Limerick", "Longford", "Louth", "Mayo", "Meath", "Monaghan",
    "Offaly", "Roscommon", "Sligo", "Tipperary", "Waterford", "Westmeath", "Wexford", "Wicklow",
];

const fn town(name: &'static str, county: &'static str, distance_from_dublin: u32) -> Town {
    Town {
        name,
        county,
        distance_from_dublin,
    }
}

pub static TOWNS: &[Town] = &[
    // Dublin
    town("Dublin", "Dublin", 0),
    town("Swords", "Dublin", 16),
    town("Dun Laoghaire", "Dublin", 12),
    town("Balbriggan", "Dublin", 35),
    town("Malahide", "Dublin", 17),
    town("Tallaght", "Dublin", 13),
    town("Blanchardstown", "Dublin", 10),
    town("Skerries", "Dublin", 30),
    town("Lucan", "Dublin", 14),
    town("Clondalkin", "Dublin", 10),
    // Wicklow
    town("Bray", "Wicklow", 20),
    town("Greystones", "Wicklow", 27),
    town("Wicklow", "Wicklow", 50),
    town("Arklow", "Wicklow", 70),
    town("Blessington", "Wicklow", 30),
    // Kildare
    town("Naas", "Kildare", 35),
    town("Newbridge", "Kildare", 45),
    town("Kildare", "Kildare", 55),
    town("Maynooth", "Kildare", 25),
    town("Celbridge", "Kildare", 22),
    town("Athy", "Kildare", 70),
    // Meath
    town("Navan", "Meath", 50),
    town("Trim", "Meath", 45),
    town("Ashbourne", "Meath", 20),
    town("Kells", "Meath", 65),
    town("Dunboyne", "Meath", 20),
    // Louth
    town("Drogheda", "Louth", 50),
    town("Dundalk", "Louth", 85),
    town("Ardee", "Louth", 70),
    // Wexford
    town("Wexford", "Wexford", 140),
    town("Enniscorthy", "Wexford", 125),
    town("Gorey", "Wexford", 90),
    town("New Ross", "Wexford", 145),
    // Carlow
    town("Carlow", "Carlow", 85),
    town("Tullow", "Carlow", 80),
    // Kilkenny
    town("Kilkenny", "Kilkenny", 125),
    town("Thomastown", "Kilkenny", 135),
    town("Castlecomer", "Kilkenny", 115),
    // Laois
    town("Portlaoise", "Laois", 85),
    town("Portarlington", "Laois", 70),
    town("Mountmellick", "Laois", 90),
    // Offaly
    town("Tullamore", "Offaly", 105),
    town("Birr", "Offaly", 135),
    town("Edenderry", "Offaly", 65),
    // Westmeath
    town("Athlone", "Westmeath", 125),
    town("Mullingar", "Westmeath", 80),
    town("Moate", "Westmeath", 110),
    // Longford
    town("Longford", "Longford", 125),
    town("Granard", "Longford", 105),
    // Cavan
    town("Cavan", "Cavan", 115),
    town("Bailieborough", "Cavan", 90),
    town("Virginia", "Cavan", 85),
    // Monaghan
    town("Monaghan", "Monaghan", 130),
    town("Carrickmacross", "Monaghan", 90),
    town("Castleblayney", "Monaghan", 105),
    town("Clones", "Monaghan", 135),
    // Leitrim
    town("Carrick-on-Shannon", "Leitrim", 165),
    town("Manorhamilton", "Leitrim", 205),
    town("Mohill", "Leitrim", 150),
    // Roscommon
    town("Roscommon", "Roscommon", 150),
    town("Boyle", "Roscommon", 175),
    town("Castlerea", "Roscommon", 180),
    // Sligo
    town("Sligo", "Sligo", 210),
    town("Tubbercurry", "Sligo", 215),
    town("Strandhill", "Sligo", 215),
    // Donegal
    town("Letterkenny", "Donegal", 240),
    town("Donegal", "Donegal", 225),
    town("Buncrana", "Donegal", 260),
    town("Bundoran", "Donegal", 220),
    town("Ballyshannon", "Donegal", 215),
    // Mayo
    town("Castlebar", "Mayo", 235),
    town("Westport", "Mayo", 250),
    town("Ballina", "Mayo", 240),
    town("Claremorris", "Mayo", 220),
    // Galway
    town("Galway", "Galway", 210),
    town("Tuam", "Galway", 205),
    town("Ballinasloe", "Galway", 150),
    town("Loughrea", "Galway", 185),
    town("Clifden", "Galway", 290),
    town("Oranmore", "Galway", 200),
    // Clare
    town("Ennis", "Clare", 235),
    town("Shannon", "Clare", 225),
    town("Kilrush", "Clare", 280),
    town("Kilkee", "Clare", 290),
    town("Lahinch", "Clare", 265),
    // Limerick
    town("Limerick", "Limerick", 200),
    town("Newcastle West", "Limerick", 240),
    town("Kilmallock", "Limerick", 210),
    town("Adare", "Limerick", 215),
    // Tipperary
    town("Clonmel", "Tipperary", 165),
    town("Nenagh", "Tipperary", 155),
    town("Thurles", "Tipperary", 145),
    town("Tipperary", "Tipperary", 185),
    town("Cashel", "Tipperary", 160),
    town("Roscrea", "Tipperary", 125),
    town("Carrick-on-Suir", "Tipperary", 160),
    // Waterford
    town("Waterford", "Waterford", 165),
    town("Dungarvan", "Waterford", 200),
    town("Tramore", "Waterford", 175),
    town("Lismore", "Waterford", 220),
    // Cork
    town("Cork", "Cork", 255),
    town("Mallow", "Cork", 230),
    town("Cobh", "Cork", 265),
    town("Youghal", "Cork", 235),
    town("Kinsale", "Cork", 280),
    town("Bandon", "Cork", 285),
    town("Clonakilty", "Cork", 305),
    town("Skibbereen", "Cork", 335),
    town("Bantry", "Cork", 340),
    town("Midleton", "Cork", 250),
    town("Fermoy", "Cork", 215),
    // Kerry
    town("Tralee", "Kerry", 300),
    town("Killarney", "Kerry", 300),
    town("Listowel", "Kerry", 270),
    town("Kenmare", "Kerry", 320),
    town("Dingle", "Kerry", 340),
    town("Cahersiveen", "Kerry", 360),
];

impl Town {
    /// "Dun Laoghaire, Co. Dublin"
    pub fn display(&self) -> String {
        format_town_display(self)
    }
}

/// Render a town as "Name, Co. County"
pub fn format_town_display(town: &Town) -> String {
    format!("{}, Co. {}", town.name, town.county)
}

/// Case-insensitive lookup of a town by name
pub fn find_town(name: &str) -> Option<&'static Town> {
    let name = name.trim();
    TOWNS.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// County of the named town, if it is in the table
pub fn county_for_town(name: &str) -> Option<&'static str> {
    find_town(name).map(|t| t.county)
}

/// All towns in a county, in table order
pub fn towns_in_county(county: &str) -> Vec<&'static Town> {
    let county = county.trim();
    TOWNS
        .iter()
        .filter(|t| t.county.eq_ignore_ascii_case(county))
        .collect()
}

/// Canonical spelling of a county name, if it is one of the 26
pub fn canonical_county(name: &str) -> Option<&'static str> {
    let name = name.trim();
    COUNTIES.iter().copied().find(|c| c.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_county_has_a_town() {
        for county in COUNTIES {
            assert!(
                !towns_in_county(county).is_empty(),
                "no towns for Co. {county}"
            );
        }
        assert!(TOWNS.len() >= 100, "expected 100+ towns, got {}", TOWNS.len());
    }

    #[test]
    fn test_single_capital_and_unique_entries() {
        let capitals: Vec<_> = TOWNS.iter().filter(|t| t.distance_from_dublin == 0).collect();
        assert_eq!(capitals.len(), 1);
        assert_eq!(capitals[0].name, "Dublin");

        let mut seen = HashSet::new();
        for t in TOWNS {
            assert!(seen.insert((t.name, t.county)), "duplicate {}", t.name);
            assert!(canonical_county(t.county).is_some(), "bad county {}", t.county);
        }
    }

    #[test]
    fn test_format_town_display() {
        let town = find_town("dun laoghaire").unwrap();
        assert_eq!(format_town_display(town), "Dun Laoghaire, Co. Dublin");
        assert_eq!(town.display(), "Dun Laoghaire, Co. Dublin");
    }

    #[test]
    fn test_county_lookups() {
        assert_eq!(county_for_town("CARRICKMACROSS"), Some("Monaghan"));
        assert_eq!(county_for_town("Atlantis"), None);
        assert_eq!(canonical_county("wicklow"), Some("Wicklow"));
        assert_eq!(canonical_county("Wonderland"), None);
    }
}
