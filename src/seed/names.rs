use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Name and place pools for generated academy data. Hungarian name order
/// puts the family name first; `Player::display_name` follows suit.

pub const SURNAMES: &[&str] = &[
    "Nagy", "Kovács", "Tóth", "Szabó", "Horváth", "Varga", "Kiss", "Molnár", "Németh", "Farkas",
    "Balogh", "Papp", "Takács", "Juhász", "Lakatos", "Mészáros", "Oláh", "Simon", "Rácz", "Fekete",
    "Szilágyi", "Török", "Fehér", "Gál", "Kocsis", "Pintér", "Szűcs", "Fodor", "Sipos", "Magyar",
    "Lukács", "Gulyás", "Bíró", "Király", "Katona", "Jakab", "Sándor", "Boros", "Fazekas", "Orbán",
];

pub const MALE_GIVEN_NAMES: &[&str] = &[
    "Bence", "Máté", "Levente", "Dominik", "Noel", "Marcell", "Dániel", "Zalán", "Ádám", "Milán",
    "Botond", "Péter", "Balázs", "Gergő", "Kristóf", "Zsombor", "Olivér", "Áron", "Bálint", "Csaba",
    "Tamás", "Márk", "Dávid", "Barnabás", "Zoltán", "Attila", "Gábor", "Krisztián", "Richárd",
    "Szabolcs", "Vince", "Hunor", "Benett", "Nándor", "Erik",
];

pub const FEMALE_GIVEN_NAMES: &[&str] = &[
    "Anna", "Katalin", "Erzsébet", "Éva", "Ildikó", "Judit", "Ágnes", "Andrea", "Zsuzsanna",
    "Mónika", "Krisztina", "Eszter", "Viktória", "Szilvia", "Tímea", "Nóra", "Orsolya", "Beáta",
    "Edina", "Gabriella",
];

pub const TOWNS: &[&str] = &[
    "Debrecen", "Szeged", "Miskolc", "Pécs", "Győr", "Nyíregyháza", "Kecskemét", "Székesfehérvár",
    "Szombathely", "Szolnok", "Tatabánya", "Kaposvár", "Sopron", "Veszprém", "Zalaegerszeg",
    "Eger", "Dunaújváros", "Hódmezővásárhely", "Békéscsaba", "Cegléd",
];

pub const CLUB_SUFFIXES: &[&str] = &["SE", "FC", "SC", "VSC", "Utánpótlás SE", "Akadémia"];

pub const TRAINING_LOCATIONS: &[&str] = &[
    "Fő pálya",
    "Műfüves pálya",
    "B pálya",
    "Edzőterem",
    "Sportcsarnok",
];

pub const TRAINING_FOCUS: &[&str] = &[
    "labdabirtoklás",
    "befejezések",
    "átmenetek",
    "pressing",
    "rögzített helyzetek",
    "koordináció",
    "kapura lövések",
];

pub fn surname(rng: &mut StdRng) -> &'static str {
    SURNAMES.choose(rng).copied().unwrap_or("Nagy")
}

pub fn male_given_name(rng: &mut StdRng) -> &'static str {
    MALE_GIVEN_NAMES.choose(rng).copied().unwrap_or("Bence")
}

pub fn female_given_name(rng: &mut StdRng) -> &'static str {
    FEMALE_GIVEN_NAMES.choose(rng).copied().unwrap_or("Anna")
}

pub fn town(rng: &mut StdRng) -> &'static str {
    TOWNS.choose(rng).copied().unwrap_or("Szeged")
}

pub fn club_suffix(rng: &mut StdRng) -> &'static str {
    CLUB_SUFFIXES.choose(rng).copied().unwrap_or("SE")
}

pub fn training_location(rng: &mut StdRng) -> &'static str {
    TRAINING_LOCATIONS.choose(rng).copied().unwrap_or("Fő pálya")
}

pub fn training_focus(rng: &mut StdRng) -> &'static str {
    TRAINING_FOCUS
        .choose(rng)
        .copied()
        .unwrap_or("labdabirtoklás")
}

/// Throwaway email for a generated account, unique via a counter the
/// caller increments.
pub fn email_for(full_name: &str, n: usize) -> String {
    let slug: String = full_name
        .chars()
        .filter_map(|c| match c {
            'á' | 'Á' => Some('a'),
            'é' | 'É' => Some('e'),
            'í' | 'Í' => Some('i'),
            'ó' | 'Ó' | 'ö' | 'Ö' | 'ő' | 'Ő' => Some('o'),
            'ú' | 'Ú' | 'ü' | 'Ü' | 'ű' | 'Ű' => Some('u'),
            ' ' => Some('.'),
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect();

    format!("{slug}{n}@example.hu")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_slug_strips_accents() {
        assert_eq!(email_for("Szűcs Ágnes", 7), "szucs.agnes7@example.hu");
        assert_eq!(email_for("Tóth Péter", 12), "toth.peter12@example.hu");
    }
}
