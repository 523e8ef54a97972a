//! Fixed layout of the raid dashboard: which columns are charted, which are
//! ranked in tables, and how each is titled.

use serde::Serialize;

/// Default number of rows in a ranking table.
pub const DEFAULT_TABLE_ROWS: usize = 20;

/// Default label of the value column in a ranking table.
pub const DEFAULT_VALUE_LABEL: &str = "used";

/// Column driving the overall statistics views.
pub const DPS_COLUMN: &str = "dps";

/// Column ranked by the healer chart.
pub const HPS_COLUMN: &str = "hps";

/// Rows shown by each overall statistics table.
pub const OVERALL_ROWS: usize = 10;

/// A bar chart over one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: &'static str,
    pub column: &'static str,
    pub top: usize,
}

/// A ranking table over one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSpec {
    pub title: &'static str,
    pub column: &'static str,
}

/// A titled group of ranking tables rendered side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSpec {
    pub title: &'static str,
    pub tables: Vec<TableSpec>,
}

/// Everything the dashboard renders, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pub charts: Vec<ChartSpec>,
    pub sections: Vec<SectionSpec>,
    /// Rows per ranking table.
    pub table_rows: usize,
}

const fn table(title: &'static str, column: &'static str) -> TableSpec {
    TableSpec { title, column }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::raid()
    }
}

impl Catalog {
    /// The standard raid layout: throughput charts plus consumable and
    /// class-ability rankings.
    pub fn raid() -> Self {
        let section = |title: &'static str, tables: Vec<TableSpec>| SectionSpec { title, tables };

        Self {
            charts: vec![
                ChartSpec {
                    title: "Top 10 Damage Dealers (DPS)",
                    column: DPS_COLUMN,
                    top: 10,
                },
                ChartSpec {
                    title: "Top 5 Healers (HPS)",
                    column: HPS_COLUMN,
                    top: 5,
                },
            ],
            sections: vec![
                section(
                    "Potions",
                    vec![
                        table("HASTE POTION", "haste_potion"),
                        table("DESTRUCTION POTION", "destruction_potion"),
                        table("ELIXIR OF DEMONSLAYING", "spell_elixir_of_demonslaying"),
                        table("MANA POTION", "mana_potion"),
                    ],
                ),
                section(
                    "Sappers",
                    vec![
                        table("SUPER SAPPER CHARGE", "super_sapper_charge"),
                        table("GOBLIN SAPPER CHARGE", "goblin_sapper_charge"),
                    ],
                ),
                section(
                    "Necks",
                    vec![
                        table("BRAIDED ETERNIUM CHAIN", "spell_braided_eternium_chain"),
                        table("CHAIN OF THE TWILIGHT OWL", "spell_chain_of_the_twilight_owl"),
                        table("EYE OF THE NIGHT", "spell_eye_of_the_night"),
                    ],
                ),
                section(
                    "Warriors",
                    vec![
                        table("SUNDER ARMOR", "spell_sunder_armor"),
                        table("DEMORALIZING SHOUT", "spell_demoralizing_shout"),
                        table("THUNDER CLAP", "spell_thunder_clap"),
                        table("PUMMEL", "spell_pummel"),
                    ],
                ),
                section(
                    "Druids",
                    vec![
                        table("FAERIE FIRE", "spell_faerie_fire"),
                        table("INSECT SWARM", "spell_insect_swarm"),
                        table("INNERVATE", "spell_innervate"),
                    ],
                ),
                section(
                    "Warlocks",
                    vec![
                        table("CURSE OF THE ELEMENTS", "spell_curse_of_the_elements"),
                        table("CURSE OF RECKLESSNESS", "spell_curse_of_recklessness"),
                        table("CURSE OF TONGUES", "spell_curse_of_tongues"),
                        table("CURSE OF AGONY", "spell_curse_of_agony"),
                        table("CURSE OF DOOM", "spell_curse_of_doom"),
                        table("SHADOW VULNERABILITY", "spell_shadow_vulnerability"),
                    ],
                ),
                section(
                    "Shamans",
                    vec![
                        table("BLOODLUST", "spell_bloodlust"),
                        table("MANA TIDE TOTEM", "spell_mana_tide_totem"),
                        table("NATURE'S SWIFTNESS", "spell_natures_swiftness"),
                        table("PURGE", "spell_purge"),
                    ],
                ),
                section(
                    "Buffs",
                    vec![
                        table("FORTITUDE", "spell_fortitude"),
                        table("INTELLECT", "spell_intellect"),
                        table("MOTW", "spell_mark_of_the_wild"),
                    ],
                ),
                section(
                    "Other",
                    vec![
                        table("SCROLL OF STRENGTH", "spell_scroll_of_strength"),
                        table("SCROLL OF AGILITY", "spell_scroll_of_agility"),
                        table("DRUMS OF BATTLE", "spell_drums_of_battle"),
                    ],
                ),
                section("Resurrects", vec![table("RESURRECTS", "spell_resurrects")]),
            ],
            table_rows: DEFAULT_TABLE_ROWS,
        }
    }

    /// Same layout with a different ranking-table length.
    pub fn with_table_rows(mut self, rows: usize) -> Self {
        self.table_rows = rows;
        self
    }
}
