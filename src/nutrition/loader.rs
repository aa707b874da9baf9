use std::path::Path;

use serde::Deserialize;

use crate::nutrition::{normalize, Nutrient, NutritionRecord, NutritionTable};

// Cells arrive as text so that blanks and "N/A" markers survive decoding.
#[derive(Debug, Deserialize)]
struct RawRow {
    food_name: String,
    #[serde(default)]
    energy_kcal: String,
    #[serde(default)]
    protein_g: String,
    #[serde(default)]
    fat_g: String,
    #[serde(default)]
    carb_g: String,
}

impl NutritionTable {
    /// Reads the nutrition CSV once at startup. Rows without a food name are
    /// skipped; a reader-level failure is returned to the caller, which falls
    /// back to an empty table rather than aborting the process.
    pub fn load_csv(path: &Path) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut table = NutritionTable::empty();
        for row in reader.deserialize::<RawRow>() {
            let row = row?;
            if normalize(&row.food_name).is_empty() {
                continue;
            }
            table.insert(NutritionRecord {
                food_name: row.food_name,
                energy_kcal: parse_nutrient(&row.energy_kcal),
                protein_g: parse_nutrient(&row.protein_g),
                fat_g: parse_nutrient(&row.fat_g),
                carb_g: parse_nutrient(&row.carb_g),
            });
        }
        Ok(table)
    }
}

fn parse_nutrient(cell: &str) -> Nutrient {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("n/a") || cell.eq_ignore_ascii_case("na") {
        return Nutrient::NotAvailable;
    }
    cell.parse::<f64>()
        .map(Nutrient::Value)
        .unwrap_or(Nutrient::NotAvailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_rows_keyed_by_normalized_name() {
        let file = write_csv(
            "food_name,energy_kcal,protein_g,fat_g,carb_g\n\
             Dosa ,133,3.9,3.7,18.6\n\
             idli,58,2.0,0.4,12.0\n",
        );
        let table = NutritionTable::load_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);

        let dosa = table.lookup("Dosa").unwrap();
        assert_eq!(dosa.food_name, "dosa");
        assert_eq!(dosa.energy_kcal, Nutrient::Value(133.0));
        assert_eq!(dosa.carb_g, Nutrient::Value(18.6));
    }

    #[test]
    fn blank_and_na_cells_become_not_available() {
        let file = write_csv(
            "food_name,energy_kcal,protein_g,fat_g,carb_g\n\
             vada,,N/A,na,5.1\n",
        );
        let table = NutritionTable::load_csv(file.path()).unwrap();
        let vada = table.lookup("vada").unwrap();
        assert_eq!(vada.energy_kcal, Nutrient::NotAvailable);
        assert_eq!(vada.protein_g, Nutrient::NotAvailable);
        assert_eq!(vada.fat_g, Nutrient::NotAvailable);
        assert_eq!(vada.carb_g, Nutrient::Value(5.1));
    }

    #[test]
    fn unparseable_numbers_become_not_available() {
        let file = write_csv(
            "food_name,energy_kcal,protein_g,fat_g,carb_g\n\
             halwa,lots,1.1,2.2,3.3\n",
        );
        let table = NutritionTable::load_csv(file.path()).unwrap();
        assert_eq!(
            table.lookup("halwa").unwrap().energy_kcal,
            Nutrient::NotAvailable
        );
    }

    #[test]
    fn rows_without_a_food_name_are_skipped() {
        let file = write_csv(
            "food_name,energy_kcal,protein_g,fat_g,carb_g\n\
             ,100,1,1,1\n\
             poha,130,2.6,1.5,25.0\n",
        );
        let table = NutritionTable::load_csv(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(NutritionTable::load_csv(Path::new("does/not/exist.csv")).is_err());
    }

    #[test]
    fn malformed_rows_are_an_error() {
        let file = write_csv(
            "food_name,energy_kcal,protein_g,fat_g,carb_g\n\
             dosa,133\n",
        );
        assert!(NutritionTable::load_csv(file.path()).is_err());
    }
}
