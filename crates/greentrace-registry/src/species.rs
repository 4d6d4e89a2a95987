//! Species catalogue used by the classifier.

use greentrace_network::ConservationStatus;
use serde::Serialize;

/// A known species and what the classifier reports for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesProfile {
    /// Lookup key
    pub key: &'static str,
    pub species: &'static str,
    pub common_name: &'static str,
    pub scientific_name: &'static str,
    /// Classifier confidence, 0.0 - 1.0
    pub confidence: f64,
    pub conservation_status: ConservationStatus,
    pub description: &'static str,
}

macro_rules! species {
    ($key:literal, $species:literal, $common:literal, $scientific:literal, $confidence:literal, $status:ident, $description:literal) => {
        SpeciesProfile {
            key: $key,
            species: $species,
            common_name: $common,
            scientific_name: $scientific,
            confidence: $confidence,
            conservation_status: ConservationStatus::$status,
            description: $description,
        }
    };
}

/// Species the classifier can report.
pub const CATALOGUE: &[SpeciesProfile] = &[
    species!("mango", "Mango", "Mango Tree", "Mangifera indica", 0.92, Stable,
        "Common fruit tree, important for urban biodiversity"),
    species!("jacaranda", "Jacaranda", "Jacaranda Tree", "Jacaranda mimosifolia", 0.88, Stable,
        "Ornamental tree with purple flowers, non-native but established"),
    species!("neem", "Neem", "Neem Tree", "Azadirachta indica", 0.85, Stable,
        "Medicinal tree with natural pesticide properties"),
    species!("baobab", "Baobab", "Baobab Tree", "Adansonia digitata", 0.95, Vulnerable,
        "Ancient tree species, culturally significant and drought-resistant"),
    species!("acacia", "Acacia", "Acacia Tree", "Acacia species", 0.78, Stable,
        "Native tree important for soil conservation"),
    species!("eucalyptus", "Eucalyptus", "Eucalyptus Tree", "Eucalyptus species", 0.82, Stable,
        "Fast-growing tree, can impact local water table"),
    species!("cedar", "Cedar", "Cedar Tree", "Cedrus species", 0.91, Endangered,
        "Valuable timber tree, declining due to over-harvesting"),
    species!("mukinduri", "Mukinduri", "East African Greenheart", "Warburgia ugandensis", 0.90, Vulnerable,
        "Medicinal tree with antimicrobial properties, critical for forest ecosystems"),
    species!("muringa", "Muringa", "Sausage Tree", "Kigelia africana", 0.87, Stable,
        "Tree with large fruit, used in traditional medicine and savanna restoration"),
    species!("muhugu", "Muhugu", "African Teak", "Milicia excelsa", 0.93, Endangered,
        "Hardwood tree, heavily exploited for timber, vital for forest canopy"),
    species!("muthiga", "Muthiga", "Red Stinkwood", "Prunus africana", 0.89, Endangered,
        "Medicinal bark tree, threatened by overharvesting"),
    species!("mugumo", "Mugumo", "Strangler Fig", "Ficus natalensis", 0.94, Stable,
        "Keystone species, supports epiphytic biodiversity and cultural significance"),
    species!("mukeu", "Mukeu", "White Stinkwood", "Celtis africana", 0.86, Stable,
        "Deciduous tree, provides shade and supports avian seed dispersal"),
    species!("mutamayu", "Mutamayu", "Cape Chestnut", "Calodendrum capense", 0.91, Stable,
        "Ornamental tree with pink flowers, enhances urban pollinator habitats"),
    species!("muringu", "Muringu", "Cordia", "Cordia africana", 0.88, Stable,
        "Multipurpose tree, used for timber and fodder, supports soil fertility"),
    species!("muthaiti", "Muthaiti", "Wild Olive", "Olea europaea subsp. cuspidata", 0.90, Stable,
        "Drought-resistant tree, important for fruit and oil production"),
    species!("muiri", "Muiri", "African Cherry", "Prunus cerasoides", 0.91, Vulnerable,
        "Medicinal tree, bark used in traditional remedies, threatened by logging"),
    species!("muthirioni", "Muthirioni", "Yellowwood", "Podocarpus latifolius", 0.93, Endangered,
        "Coniferous tree, critical for montane forest ecosystems"),
    species!("mutundu", "Mutundu", "Croton", "Croton megalocarpus", 0.89, Stable,
        "Pioneer species, used for biofuel and soil stabilization"),
    species!("muthi", "Muthi", "African Mahogany", "Khaya anthotheca", 0.92, Vulnerable,
        "Timber tree, threatened by overexploitation"),
];

/// Look up a profile by key.
pub fn lookup(key: &str) -> Option<&'static SpeciesProfile> {
    CATALOGUE.iter().find(|p| p.key == key)
}

/// Look up a profile by display species name.
pub fn by_species(species: &str) -> Option<&'static SpeciesProfile> {
    CATALOGUE.iter().find(|p| p.species == species)
}
