//! Romanian diacritic correction for the competition catalogue.
//!
//! Replaces whole words typed without diacritics ("Brasov") by their
//! correct spelling ("Brașov") in the `name`, `location` and
//! `location_details` of every competition. Works on the raw JSON value so
//! that fields this crate does not model survive a rewrite.

use regex::Regex;
use serde_json::Value;
use tracing::{debug, info};

use crate::validate::{TRACKED_LIST, UNTRACKED_LIST};

/// Fields of a competition that are corrected.
pub const CORRECTED_FIELDS: [&str; 3] = ["name", "location", "location_details"];

/// Plain spelling and corrected spelling, applied in order.
///
/// Multi-word entries after a single-word prefix ("Targu" then "Targu Jiu")
/// never match once the prefix has been corrected; they are kept so the
/// table reads as a list of known place names.
static CORRECTIONS: &[(&str, &str)] = &[
    // Towns and counties
    ("Brasov", "Brașov"),
    ("Bucuresti", "București"),
    ("Timisoara", "Timișoara"),
    ("Constanta", "Constanța"),
    ("Iasi", "Iași"),
    ("Targu", "Târgu"),
    ("Tirgu", "Târgu"),
    ("Ploiesti", "Ploiești"),
    ("Pitesti", "Pitești"),
    ("Buzau", "Buzău"),
    ("Galati", "Galați"),
    ("Bacau", "Bacău"),
    ("Resita", "Reșița"),
    ("Calarasi", "Călărași"),
    ("Botosani", "Botoșani"),
    ("Ramnicu", "Râmnicu"),
    ("Tarnaveni", "Târnăveni"),
    ("Bistrita", "Bistrița"),
    ("Medias", "Mediaș"),
    ("Ludus", "Luduș"),
    ("Sighisoara", "Sighișoara"),
    ("Fagaras", "Făgăraș"),
    ("Campulung", "Câmpulung"),
    ("Curtea de Arges", "Curtea de Argeș"),
    ("Sfantu", "Sfântu"),
    ("Sangeorz", "Sângeorz"),
    ("Toplita", "Toplița"),
    ("Sacele", "Săcele"),
    ("Fagarasului", "Făgărașului"),
    ("Rasnov", "Râșnov"),
    ("Intorsura", "Întorsura"),
    ("Buzaului", "Buzăului"),
    ("Campina", "Câmpina"),
    ("Valenii", "Vălenii"),
    ("Muntii", "Munții"),
    ("Ceahlau", "Ceahlău"),
    ("Ciucas", "Ciucaș"),
    ("Neamt", "Neamț"),
    ("Pascani", "Pașcani"),
    ("Focsani", "Focșani"),
    ("Orastie", "Orăștie"),
    ("Petrosani", "Petroșani"),
    ("Caransebes", "Caransebeș"),
    ("Timisului", "Timișului"),
    ("Sannicolau", "Sânnicolau"),
    ("Chisineu", "Chișineu"),
    ("Cris", "Criș"),
    ("Pancota", "Pâncota"),
    ("Nadlac", "Nădlac"),
    ("Magurele", "Măgurele"),
    ("Oltenita", "Oltenița"),
    ("Fetesti", "Fetești"),
    ("Tandarei", "Țăndărei"),
    ("Navodari", "Năvodari"),
    ("Cernavoda", "Cernavodă"),
    ("Macin", "Măcin"),
    ("Braila", "Brăila"),
    ("Insuratei", "Însurăței"),
    ("Rosiori", "Roșiori"),
    ("Turnu Magurele", "Turnu Măgurele"),
    ("Bailesti", "Băilești"),
    ("Filiasi", "Filiași"),
    ("Targu Jiu", "Târgu Jiu"),
    ("Bumbesti", "Bumbești"),
    ("Balcesti", "Bălcești"),
    ("Scornicesti", "Scornicești"),
    ("Draganesti", "Drăgănești"),
    ("Comanesti", "Comănești"),
    ("Onesti", "Onești"),
    ("Moinesti", "Moinești"),
    ("Darmanesti", "Dărmănești"),
    ("Targu Ocna", "Târgu Ocna"),
    ("Slanic", "Slănic"),
    ("Piatra Neamt", "Piatra Neamț"),
    ("Targu Neamt", "Târgu Neamț"),
    ("Mures", "Mureș"),
    ("Marmatiei", "Marmației"),
    ("Viseul", "Vișeul"),
    ("Sapanta", "Săpânța"),
    ("Negresti", "Negrești"),
    ("Oas", "Oaș"),
    ("Zalau", "Zalău"),
    ("Simleu", "Șimleu"),
    ("Campia", "Câmpia"),
    ("Beius", "Beiuș"),
    ("Alesd", "Aleșd"),
    ("Sebes", "Sebeș"),
    ("Muresului", "Mureșului"),
    ("Cisnadie", "Cisnădie"),
    ("Talmaciu", "Tălmaciu"),
    ("Copsa", "Copșa"),
    ("Mica", "Mică"),
    // Landmarks and common words
    ("Vaile", "Văile"),
    ("Padurile", "Pădurile"),
    ("Padurea", "Pădurea"),
    ("Varful", "Vârful"),
    ("Pestera", "Peștera"),
    ("Raul", "Râul"),
    ("Dunarii", "Dunării"),
    ("Dunarea", "Dunărea"),
    ("Ariesului", "Arieșului"),
    ("Arieseni", "Arieșeni"),
    ("Somes", "Someș"),
    ("Somesului", "Someșului"),
    ("Arges", "Argeș"),
    ("Argesului", "Argeșului"),
    ("Dambovita", "Dâmbovița"),
    ("Dambovitei", "Dâmboviței"),
    ("Ialomita", "Ialomița"),
    ("Ialomitei", "Ialomiței"),
    ("Baneasa", "Băneasa"),
    ("Baicoi", "Băicoi"),
    ("Branesti", "Brănești"),
    ("Bals", "Bălș"),
    ("Calimanesti", "Călimănești"),
    ("Ramnicu Valcea", "Râmnicu Vâlcea"),
    ("Valcea", "Vâlcea"),
    ("Baragan", "Bărăgan"),
    ("Valeni", "Văleni"),
    ("Stefanesti", "Ștefănești"),
    ("Popesti", "Popești"),
    ("Domnesti", "Domnești"),
    ("Maramures", "Maramureș"),
    ("Salaj", "Sălaj"),
    ("Mehedinti", "Mehedinți"),
];

/// One word replaced in one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordChange {
    pub field: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}

/// Every change made to a single competition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionChanges {
    pub list: &'static str,
    pub index: usize,
    pub name: String,
    pub id: Option<u64>,
    pub changes: Vec<WordChange>,
}

/// Result of correcting a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiacriticReport {
    pub competitions: Vec<CompetitionChanges>,
}

impl DiacriticReport {
    pub fn total_changes(&self) -> usize {
        self.competitions.iter().map(|c| c.changes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.competitions.is_empty()
    }
}

struct Rule {
    pattern: Regex,
    from: &'static str,
    to: &'static str,
}

/// Compiled whole-word correction rules.
pub struct DiacriticCorrector {
    rules: Vec<Rule>,
}

impl DiacriticCorrector {
    pub fn new() -> Result<Self, regex::Error> {
        let rules = CORRECTIONS
            .iter()
            .map(|&(from, to)| {
                Ok(Rule {
                    pattern: Regex::new(&format!(r"\b{}\b", regex::escape(from)))?,
                    from,
                    to,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        debug!("Compiled {} diacritic rules", rules.len());
        Ok(Self { rules })
    }

    /// Apply every rule in order. Returns the corrected text and the
    /// (plain, corrected) pairs that matched.
    pub fn fix_text(&self, text: &str) -> (String, Vec<(&'static str, &'static str)>) {
        let mut fixed = text.to_string();
        let mut changes = Vec::new();

        for rule in &self.rules {
            if !rule.pattern.is_match(&fixed) {
                continue;
            }
            fixed = rule.pattern.replace_all(&fixed, rule.to).into_owned();
            changes.push((rule.from, rule.to));
        }

        (fixed, changes)
    }

    /// Correct every competition of both lists in place.
    ///
    /// Non-string fields and competitions that are not objects are left alone.
    pub fn fix_document(&self, document: &mut Value) -> DiacriticReport {
        let mut report = DiacriticReport::default();

        for list in [TRACKED_LIST, UNTRACKED_LIST] {
            let Some(competitions) = document.get_mut(list).and_then(Value::as_array_mut) else {
                continue;
            };

            for (index, competition) in competitions.iter_mut().enumerate() {
                let Some(object) = competition.as_object_mut() else {
                    continue;
                };

                let name = object
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown")
                    .to_string();
                let id = object.get("id").and_then(Value::as_u64);
                let mut changes = Vec::new();

                for field in CORRECTED_FIELDS {
                    let Some(Value::String(text)) = object.get_mut(field) else {
                        continue;
                    };
                    let (fixed, matched) = self.fix_text(text);
                    if fixed != *text {
                        *text = fixed;
                    }
                    changes.extend(
                        matched
                            .into_iter()
                            .map(|(from, to)| WordChange { field, from, to }),
                    );
                }

                if !changes.is_empty() {
                    report.competitions.push(CompetitionChanges {
                        list,
                        index,
                        name,
                        id,
                        changes,
                    });
                }
            }
        }

        info!(
            "Diacritics: {} changes in {} competitions",
            report.total_changes(),
            report.competitions.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn corrector() -> DiacriticCorrector {
        DiacriticCorrector::new().unwrap()
    }

    #[test]
    fn test_table_has_no_identity_or_duplicate_entries() {
        let mut seen = std::collections::HashSet::new();
        for (from, to) in CORRECTIONS {
            assert_ne!(from, to);
            assert!(seen.insert(*from), "duplicate entry {}", from);
        }
    }

    #[test]
    fn test_fix_text_whole_words() {
        let corrector = corrector();

        let (fixed, changes) = corrector.fix_text("Crosul Padurea Baneasa");
        assert_eq!(fixed, "Crosul Pădurea Băneasa");
        assert_eq!(
            changes,
            vec![("Padurea", "Pădurea"), ("Baneasa", "Băneasa")]
        );

        // Prefix of a longer word is not touched
        let (fixed, changes) = corrector.fix_text("Brasovean Trail");
        assert_eq!(fixed, "Brasovean Trail");
        assert!(changes.is_empty());
    }

    #[test]
    fn test_fix_text_already_correct() {
        let (fixed, changes) = corrector().fix_text("Maratonul Brașovului, Brașov");
        assert_eq!(fixed, "Maratonul Brașovului, Brașov");
        assert!(changes.is_empty());
    }

    #[test]
    fn test_fix_text_multi_word_and_repeats() {
        let corrector = corrector();

        let (fixed, _) = corrector.fix_text("Ramnicu Valcea");
        assert_eq!(fixed, "Râmnicu Vâlcea");

        let (fixed, changes) = corrector.fix_text("Iasi - Iasi");
        assert_eq!(fixed, "Iași - Iași");
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_fix_document() {
        let mut document = json!({
            "competitions": [
                {
                    "id": 1,
                    "name": "Semimaratonul Brasov",
                    "location": "Brasov",
                    "location_details": "Parcul Titulescu",
                    "county": "BV",
                    "editions": []
                },
                {"id": 2, "name": "Cluj Run", "location": "Cluj-Napoca", "editions": []}
            ],
            "competitions_no_statistics": [
                {"id": 0, "name": "Vârful cu Dor", "location": "Sinaia", "location_details": "Varful cu Dor"}
            ],
            "extra": "untouched"
        });

        let report = corrector().fix_document(&mut document);

        assert_eq!(report.total_changes(), 3);
        assert_eq!(report.competitions.len(), 2);
        assert_eq!(report.competitions[0].list, "competitions");
        assert_eq!(report.competitions[0].id, Some(1));
        assert_eq!(report.competitions[0].name, "Semimaratonul Brasov");
        assert_eq!(
            report.competitions[0].changes[1],
            WordChange {
                field: "location",
                from: "Brasov",
                to: "Brașov"
            }
        );
        assert_eq!(report.competitions[1].list, "competitions_no_statistics");
        assert_eq!(report.competitions[1].index, 0);

        assert_eq!(document["competitions"][0]["name"], "Semimaratonul Brașov");
        assert_eq!(document["competitions"][0]["location"], "Brașov");
        assert_eq!(document["competitions"][0]["county"], "BV");
        assert_eq!(document["competitions"][1]["name"], "Cluj Run");
        assert_eq!(
            document["competitions_no_statistics"][0]["location_details"],
            "Vârful cu Dor"
        );
        assert_eq!(document["extra"], "untouched");
    }

    #[test]
    fn test_fix_document_second_pass_is_noop() {
        let corrector = corrector();
        let mut document = json!({
            "competitions": [{"id": 1, "name": "Crosul Zalau", "location": "Zalau"}],
            "competitions_no_statistics": []
        });

        assert_eq!(corrector.fix_document(&mut document).total_changes(), 2);
        let once = document.clone();

        assert!(corrector.fix_document(&mut document).is_empty());
        assert_eq!(document, once);
    }

    #[test]
    fn test_fix_document_skips_non_string_fields() {
        let mut document = json!({
            "competitions": [{"id": 1, "name": "Iasi", "location": null}, 5]
        });

        let report = corrector().fix_document(&mut document);

        assert_eq!(report.total_changes(), 1);
        assert!(document["competitions"][0]["location"].is_null());
    }
}
