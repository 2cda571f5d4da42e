//! Default leader-panel catalog used to seed an empty registry.

use crate::SymbolRecord;

/// Sector labels accepted by the registry.
pub const SECTORS: &[&str] = &[
    "Bancos",
    "Petróleo y Gas",
    "Telecomunicaciones",
    "Energía",
    "Siderurgia",
    "Alimentos",
    "Construcción",
    "Metalurgia",
    "Papel",
    "Transporte",
    "Holding",
    "Otros",
];

/// Market labels accepted by the registry.
pub const MARKETS: &[&str] = &["MERVAL", "MAE", "BYMA"];

/// Settlement currencies accepted by the registry.
pub const CURRENCIES: &[&str] = &["ARS", "USD"];

const DEFAULT_ENTRIES: &[(&str, &str, &str)] = &[
    ("ALUA", "Aluar Aluminio Argentino S.A.I.C.", "Metalurgia"),
    ("BBAR", "Banco BBVA Argentina S.A.", "Bancos"),
    ("BMA", "Banco Macro S.A.", "Bancos"),
    ("BYMA", "Bolsas y Mercados Argentinos S.A.", "Otros"),
    ("CEPU", "Central Puerto S.A.", "Energía"),
    ("COME", "Sociedad Comercial del Plata S.A.", "Holding"),
    ("CRES", "Cresud S.A.C.I.F. y A.", "Alimentos"),
    ("CVH", "Cablevision Holding S.A.", "Telecomunicaciones"),
    ("EDN", "Edenor S.A.", "Energía"),
    ("GGAL", "Grupo Financiero Galicia S.A.", "Bancos"),
    ("HARG", "Holcim Argentina S.A.", "Construcción"),
    ("HAVA", "Havanna Holding S.A.", "Alimentos"),
    ("INTR", "Intruvias S.A.", "Construcción"),
    ("LOMA", "Loma Negra Compañía Industrial Argentina S.A.", "Construcción"),
    ("METR", "Metrogas S.A.", "Energía"),
    ("MIRG", "Mirgor S.A.C.I.F.I.A.", "Otros"),
    ("PAMP", "Pampa Energía S.A.", "Energía"),
    ("SUPV", "Grupo Supervielle S.A.", "Bancos"),
    ("TECO2", "Telecom Argentina S.A.", "Telecomunicaciones"),
    ("TGNO4", "Transportadora de Gas del Norte S.A.", "Energía"),
    ("TGSU2", "Transportadora de Gas del Sur S.A.", "Energía"),
    ("TRAN", "Transener S.A.", "Energía"),
    ("TXAR", "Ternium Argentina S.A.", "Siderurgia"),
    ("VALO", "Banco de Valores S.A.", "Bancos"),
    ("YPFD", "YPF S.A.", "Petróleo y Gas"),
];

/// Records inserted by [`crate::SymbolStore::seed_default_catalog`].
pub fn default_catalog() -> Vec<SymbolRecord> {
    DEFAULT_ENTRIES
        .iter()
        .map(|(symbol, name, sector)| SymbolRecord::merval(*symbol, *name, *sector))
        .collect()
}
