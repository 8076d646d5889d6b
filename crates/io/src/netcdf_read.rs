//! Low-level NetCDF extraction helpers.

use std::path::Path;

use netcdf::AttributeValue;

use crate::error::IoError;

/// Raw time information of a NetCDF file, before decoding.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NetcdfTime {
    /// Numeric offsets of the time variable.
    pub(crate) offsets: Vec<f64>,
    /// The `units` attribute, e.g. `"days since 1850-01-01"`.
    pub(crate) units: String,
    /// The `calendar` attribute, if present.
    pub(crate) calendar: Option<String>,
    /// The global `frequency` attribute, if present.
    pub(crate) frequency: Option<String>,
    /// Data variables: non-coordinate variables carrying attributes.
    pub(crate) variables: Vec<String>,
}

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read the time variable together with its CF attributes.
pub(crate) fn read_time(path: &Path, time_var: &str) -> Result<NetcdfTime, IoError> {
    let file = open_file(path)?;
    let var = file
        .variable(time_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: time_var.to_string(),
            path: path.to_path_buf(),
        })?;

    let offsets = var.get_values::<f64, _>(..)?;

    let units: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    let calendar = var
        .attribute_value("calendar")
        .and_then(|res| res.ok())
        .and_then(string_value);

    let frequency = file
        .attribute("frequency")
        .and_then(|attr| attr.value().ok())
        .and_then(string_value);

    Ok(NetcdfTime {
        offsets,
        units,
        calendar,
        frequency,
        variables: data_variables(&file),
    })
}

fn string_value(value: AttributeValue) -> Option<String> {
    match value {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

fn data_variables(file: &netcdf::File) -> Vec<String> {
    file.variables()
        .filter(|var| {
            let dims = var.dimensions();
            let is_coordinate = dims.len() == 1 && dims[0].name() == var.name();
            !dims.is_empty() && !is_coordinate && var.attributes().next().is_some()
        })
        .map(|var| var.name())
        .collect()
}
