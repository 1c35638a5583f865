//! YAML 資料集載入與結構驗證
//!
//! 同時接受英文鍵與西班牙文鍵（`generales`、`recursos`、`productos`、`gastos_operacion`）。

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use toc_core::{Catalog, Dataset, DatasetInfo, ExpenseEntry, OperatingExpenses, Product, Resource};

use crate::{IoError, Result};

const GENERAL: &[&str] = &["general", "generales"];
const RESOURCES: &[&str] = &["resources", "recursos"];
const PRODUCTS: &[&str] = &["products", "productos"];
const EXPENSES: &[&str] = &["operating_expenses", "gastos_operacion"];

/// 產品原始格式
#[derive(Debug, Deserialize)]
struct RawProduct {
    #[serde(default, alias = "precio", alias = "precio_venta")]
    price: Option<Decimal>,

    #[serde(alias = "costo_ventas")]
    sales_cost: Decimal,

    #[serde(alias = "demanda")]
    demand: f64,

    #[serde(default, alias = "recursos")]
    resources: BTreeMap<String, f64>,
}

/// 從檔案載入資料集
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }

    tracing::info!("載入資料集: {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let dataset = parse_dataset(&content)?;
    tracing::info!(
        "資料集驗證完成：公司 {}，日期 {}",
        dataset.info.company,
        dataset.info.date
    );

    Ok(dataset)
}

/// 解析 YAML 內容並驗證結構
pub fn parse_dataset(content: &str) -> Result<Dataset> {
    let doc: Mapping = match serde_yaml::from_str::<Value>(content)? {
        Value::Mapping(doc) => doc,
        _ => return Err(IoError::InvalidDataset("頂層必須是映射".to_string())),
    };

    let sections: [&[&str]; 4] = [GENERAL, RESOURCES, PRODUCTS, EXPENSES];
    let missing: Vec<String> = sections
        .iter()
        .filter(|names| section(&doc, names).is_none())
        .map(|names| names[0].to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IoError::MissingSections(missing));
    }

    let info = parse_general(section(&doc, GENERAL))?;
    let resources = parse_resources(non_empty(section(&doc, RESOURCES), RESOURCES[0])?)?;
    let products = parse_products(non_empty(section(&doc, PRODUCTS), PRODUCTS[0])?)?;
    let expenses = parse_expenses(non_empty(section(&doc, EXPENSES), EXPENSES[0])?)?;

    let catalog = Catalog::new(resources, products).with_operating_expenses(expenses);
    catalog.validate()?;

    Ok(Dataset { info, catalog })
}

fn section<'a>(doc: &'a Mapping, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| doc.get(*name))
}

/// 區段必須是非空映射
fn non_empty<'a>(value: Option<&'a Value>, name: &str) -> Result<&'a Mapping> {
    match value {
        Some(Value::Mapping(map)) if !map.is_empty() => Ok(map),
        Some(Value::Mapping(_)) | Some(Value::Null) | None => Err(IoError::InvalidDataset(format!(
            "區段 '{}' 不可為空",
            name
        ))),
        Some(_) => Err(IoError::InvalidDataset(format!("區段 '{}' 必須是映射", name))),
    }
}

fn key_to_string(key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(IoError::InvalidDataset(format!("無效的鍵: {:?}", other))),
    }
}

fn parse_general(value: Option<&Value>) -> Result<DatasetInfo> {
    let invalid = || IoError::InvalidDataset("區段 'general' 必須包含 company 與 date".to_string());

    let map = match value {
        Some(Value::Mapping(map)) if !map.is_empty() => map,
        _ => return Err(invalid()),
    };

    let company = ["company", "empresa"]
        .iter()
        .find_map(|k| map.get(*k))
        .ok_or_else(invalid)?;
    let company = match company {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(invalid()),
    };

    let date = ["date", "fecha"]
        .iter()
        .find_map(|k| map.get(*k))
        .ok_or_else(invalid)?;
    let date: NaiveDate = serde_yaml::from_value(date.clone())
        .map_err(|e| IoError::InvalidDataset(format!("無效的日期: {}", e)))?;

    Ok(DatasetInfo { company, date })
}

fn parse_resources(map: &Mapping) -> Result<Vec<Resource>> {
    map.iter()
        .map(|(key, value)| {
            let id = key_to_string(key)?;
            let capacity: f64 = serde_yaml::from_value(value.clone()).map_err(|e| {
                IoError::InvalidDataset(format!("資源 {} 的產能無效: {}", id, e))
            })?;
            Ok(Resource::new(id, capacity))
        })
        .collect()
}

fn parse_products(map: &Mapping) -> Result<Vec<Product>> {
    map.iter()
        .map(|(key, value)| {
            let id = key_to_string(key)?;
            let raw: RawProduct = serde_yaml::from_value(value.clone())
                .map_err(|e| IoError::InvalidDataset(format!("產品 {} 格式錯誤: {}", id, e)))?;

            let mut product = Product::new(
                id,
                raw.price.unwrap_or(Decimal::ZERO),
                raw.sales_cost,
                raw.demand,
            );
            product.resource_usage = raw.resources;
            Ok(product)
        })
        .collect()
}

/// 費用金額保留原始值，由財務彙總時驗證
fn parse_expenses(map: &Mapping) -> Result<OperatingExpenses> {
    let entries = map
        .iter()
        .map(|(key, value)| {
            let label = key_to_string(key)?;
            let amount: serde_json::Value = serde_yaml::from_value(value.clone())?;
            Ok(ExpenseEntry { label, amount })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(OperatingExpenses { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use toc_core::TocError;

    const SPANISH: &str = r#"
generales:
  empresa: "Taller Demo "
  fecha: 2025-03-01
recursos:
  Torno: 2400
  Fresadora: 2400
productos:
  P:
    precio: 90
    costo_ventas: 45
    demanda: 100
    recursos:
      Torno: 15
      Fresadora: 10
  Q:
    precio_venta: 100
    costo_ventas: 40
    demanda: 50
    recursos:
      Fresadora: 30
gastos_operacion:
  renta: 3000
  salarios: 3000
"#;

    #[test]
    fn test_parse_spanish_keys() {
        let dataset = parse_dataset(SPANISH).unwrap();

        assert_eq!(dataset.info.company, "Taller Demo");
        assert_eq!(dataset.info.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());

        let catalog = &dataset.catalog;
        let resource_ids: Vec<_> = catalog.resources.iter().map(|r| r.resource_id.as_str()).collect();
        assert_eq!(resource_ids, vec!["Torno", "Fresadora"]);

        let product_ids: Vec<_> = catalog.products.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(product_ids, vec!["P", "Q"]);
        assert_eq!(catalog.products[1].price, Decimal::from(100));
        assert_eq!(catalog.products[0].time_on("Torno"), 15.0);

        let expenses = catalog.operating_expenses.as_ref().unwrap();
        assert_eq!(expenses.total().unwrap(), Decimal::from(6000));
    }

    #[test]
    fn test_parse_english_keys() {
        let yaml = r#"
general:
  company: Acme
  date: "2024-12-31"
resources:
  M: 100
products:
  X:
    price: 10.5
    sales_cost: 0.5
    demand: 60
    resources:
      M: 2
operating_expenses:
  rent: 100
"#;
        let dataset = parse_dataset(yaml).unwrap();

        assert_eq!(dataset.info.company, "Acme");
        assert_eq!(dataset.catalog.products[0].unit_throughput(), Decimal::from(10));
    }

    #[test]
    fn test_missing_sections_reported_together() {
        let yaml = "generales:\n  empresa: A\n  fecha: 2025-01-01\nrecursos:\n  M: 1\n";

        match parse_dataset(yaml).unwrap_err() {
            IoError::MissingSections(missing) => {
                assert_eq!(missing, vec!["products", "operating_expenses"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_section_rejected() {
        let yaml = SPANISH.replace("gastos_operacion:\n  renta: 3000\n  salarios: 3000\n", "gastos_operacion: {}\n");
        assert!(matches!(parse_dataset(&yaml), Err(IoError::InvalidDataset(_))));
    }

    #[test]
    fn test_general_requires_company_and_date() {
        let yaml = SPANISH.replace("  empresa: \"Taller Demo \"\n", "");
        assert!(matches!(parse_dataset(&yaml), Err(IoError::InvalidDataset(_))));
    }

    #[test]
    fn test_malformed_expense_kept_raw() {
        // 非數值費用由載入器保留，於財務彙總時回報
        let yaml = SPANISH.replace("salarios: 3000", "salarios: mucho");
        let dataset = parse_dataset(&yaml).unwrap();

        let err = dataset.catalog.operating_expenses.unwrap().total().unwrap_err();
        assert!(matches!(err, TocError::MalformedExpenseEntry { ref label, .. } if label == "salarios"));
    }

    #[test]
    fn test_not_yaml_mapping() {
        assert!(matches!(parse_dataset("- a\n- b\n"), Err(IoError::InvalidDataset(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset("/nonexistent/procesos.yml").unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));
    }
}
