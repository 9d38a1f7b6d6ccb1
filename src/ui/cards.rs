//! Projection of entity records onto card presentations.
//!
//! Each category has one card template. Projection is pure formatting: values
//! are shown as the server sent them, with units appended, and only
//! presentation fallbacks applied (`N/A` for an unknown cost, the raw string
//! for an unparseable release date).

use super::scale::{linear_percent, log_percent};
use super::viewmodel::{Card, CardBar, CardField};
use crate::domain::{resource_id, Film, Person, Planet, ResultList, Starship};
use chrono::NaiveDate;

/// Height treated as a full bar, in centimetres.
const MAX_HEIGHT_CM: f64 = 250.0;

/// Mass treated as a full bar, in kilograms.
const MAX_MASS_KG: f64 = 150.0;

/// Cards for every entity of a list, in list order.
#[must_use]
pub fn project(list: &ResultList) -> Vec<Card> {
    match list {
        ResultList::People(people) => people.iter().map(person_card).collect(),
        ResultList::Planets(planets) => planets.iter().map(planet_card).collect(),
        ResultList::Films(films) => films.iter().map(film_card).collect(),
        ResultList::Starships(ships) => ships.iter().map(starship_card).collect(),
    }
}

#[must_use]
pub fn person_card(person: &Person) -> Card {
    Card {
        title: person.name.clone(),
        badge: Some(format!("ID: {}", resource_id(&person.url))),
        bars: vec![
            CardBar {
                label: "HEIGHT".to_string(),
                value: format!("{} cm", person.height),
                percent: linear_percent(&person.height, MAX_HEIGHT_CM),
            },
            CardBar {
                label: "MASS".to_string(),
                value: format!("{} kg", person.mass),
                percent: linear_percent(&person.mass, MAX_MASS_KG),
            },
        ],
        fields: vec![
            CardField::new("Birth Year", &person.birth_year),
            CardField::new("Gender", capitalize_words(&person.gender)),
            CardField::new("Hair", &person.hair_color),
            CardField::new("Eyes", &person.eye_color),
        ],
        tags: person
            .films
            .iter()
            .map(|film| format!("EP {}", resource_id(film)))
            .collect(),
        ..Card::default()
    }
}

#[must_use]
pub fn planet_card(planet: &Planet) -> Card {
    Card {
        title: planet.name.clone(),
        badge: Some(planet.terrain.clone()).filter(|terrain| !terrain.is_empty()),
        bars: vec![CardBar {
            label: "POPULATION".to_string(),
            value: planet.population.clone(),
            percent: log_percent(&planet.population),
        }],
        fields: vec![
            CardField::new("Climate", &planet.climate),
            CardField::new("Gravity", &planet.gravity),
            CardField::new("Diameter", format!("{} km", planet.diameter)),
            CardField::new("Rotation", format!("{} h", planet.rotation_period)),
        ],
        ..Card::default()
    }
}

#[must_use]
pub fn film_card(film: &Film) -> Card {
    Card {
        title: film.title.clone(),
        badge: Some(format!("EP {}", film.episode_id)),
        fields: vec![
            CardField::new("Director", &film.director),
            CardField::new("Producer", &film.producer),
            CardField::new("Release Date", format_release_date(&film.release_date)),
        ],
        text: Some(collapse_whitespace(&film.opening_crawl)),
        ..Card::default()
    }
}

#[must_use]
pub fn starship_card(ship: &Starship) -> Card {
    Card {
        title: ship.name.clone(),
        subtitle: Some(ship.model.clone()).filter(|model| !model.is_empty()),
        fields: vec![
            CardField::new("Class", capitalize_words(&ship.starship_class)),
            CardField::new("Manufacturer", &ship.manufacturer),
            CardField::new("Crew", &ship.crew),
            CardField::new("Passengers", &ship.passengers),
            CardField::new("Hyperdrive", &ship.hyperdrive_rating),
            CardField::new("Length", format!("{} m", ship.length)),
            CardField::new("Cost", format_cost(&ship.cost_in_credits)),
        ],
        ..Card::default()
    }
}

/// `1977-05-25` → `May 25, 1977`; anything else is shown unchanged.
#[must_use]
pub fn format_release_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |date| date.format("%B %-d, %Y").to_string())
}

/// Credits with unit, or `N/A` when the server does not know the cost.
#[must_use]
pub fn format_cost(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("unknown") {
        "N/A".to_string()
    } else {
        format!("{raw} credits")
    }
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The crawl arrives with `\r\n` line breaks sized for the cinema screen.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn person_card_matches_template() {
        let luke = Person {
            name: "Luke Skywalker".to_string(),
            height: "172".to_string(),
            mass: "unknown".to_string(),
            gender: "male".to_string(),
            films: vec![
                "https://swapi.dev/api/films/1/".to_string(),
                "https://swapi.dev/api/films/6/".to_string(),
            ],
            url: "https://swapi.dev/api/people/1/".to_string(),
            ..Person::default()
        };
        let card = person_card(&luke);

        assert_eq!(card.badge.as_deref(), Some("ID: 1"));
        assert_eq!(card.bars[0].value, "172 cm");
        assert!((card.bars[0].percent - 68.8).abs() < 1e-9);
        assert_eq!(card.bars[1].percent, 0.0);
        assert_eq!(card.fields[1], CardField::new("Gender", "Male"));
        assert_eq!(card.tags, vec!["EP 1", "EP 6"]);
    }

    #[test]
    fn film_card_formats_release_date() {
        let film = Film {
            title: "A New Hope".to_string(),
            episode_id: 4,
            opening_crawl: "It is a period of civil war.\r\nRebel spaceships".to_string(),
            release_date: "1977-05-25".to_string(),
            ..Film::default()
        };
        let card = film_card(&film);
        assert_eq!(card.badge.as_deref(), Some("EP 4"));
        assert_eq!(card.fields[2].value, "May 25, 1977");
        assert_eq!(
            card.text.as_deref(),
            Some("It is a period of civil war. Rebel spaceships")
        );
    }

    #[test]
    fn unparseable_date_is_kept() {
        assert_eq!(format_release_date("someday"), "someday");
    }

    #[test]
    fn unknown_cost_is_not_available() {
        assert_eq!(format_cost("unknown"), "N/A");
        assert_eq!(format_cost(""), "N/A");
        assert_eq!(format_cost("149999"), "149999 credits");
    }

    #[test]
    fn starship_class_is_capitalized() {
        let ship = Starship {
            name: "X-wing".to_string(),
            starship_class: "starfighter".to_string(),
            ..Starship::default()
        };
        let card = starship_card(&ship);
        assert_eq!(card.fields[0].value, "Starfighter");
        assert!(card.subtitle.is_none());
    }

    #[test]
    fn planet_population_is_log_scaled() {
        let planet = Planet {
            name: "Tatooine".to_string(),
            terrain: "desert".to_string(),
            population: "200000".to_string(),
            diameter: "10465".to_string(),
            ..Planet::default()
        };
        let card = planet_card(&planet);
        assert_eq!(card.badge.as_deref(), Some("desert"));
        assert!(card.bars[0].percent > 40.0 && card.bars[0].percent < 45.0);
        assert_eq!(card.fields[2].value, "10465 km");
    }

    #[test]
    fn projection_keeps_server_order() {
        let list = ResultList::Films(vec![
            Film {
                title: "B".to_string(),
                ..Film::default()
            },
            Film {
                title: "A".to_string(),
                ..Film::default()
            },
        ]);
        let titles: Vec<String> = project(&list).into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }
}
