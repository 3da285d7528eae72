use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use crate::i18n::{crop_headers, Language};
use crate::repository::models::crop::Crop;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no crops to export")]
    NoData,
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Xlsx(#[from] XlsxError),
}

pub fn to_csv(crops: &[Crop], language: Language) -> Result<Vec<u8>, ExportError> {
    if crops.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(crop_headers(language))?;
    for crop in crops {
        writer.write_record([
            crop.id.to_string(),
            crop.name.clone(),
            crop.season.clone(),
            crop.yield_per_acre.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))
}

pub fn to_xlsx(crops: &[Crop], language: Language) -> Result<Vec<u8>, ExportError> {
    if crops.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Crops")?;

    for (col, header) in crop_headers(language).iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (index, crop) in crops.iter().enumerate() {
        let row = index as u32 + 1;
        sheet.write_number(row, 0, crop.id)?;
        sheet.write_string(row, 1, &crop.name)?;
        sheet.write_string(row, 2, &crop.season)?;
        sheet.write_number(row, 3, crop.yield_per_acre)?;
    }

    Ok(workbook.save_to_buffer()?)
}
