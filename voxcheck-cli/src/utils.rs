use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use voxcheck::VoxcheckError;
use voxcheck::models::ValidationInput;

fn read_source(path: &Path) -> voxcheck::Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    fs::read_to_string(path).map_err(|e| {
        VoxcheckError::Input(format!("Failed to read {}: {}", path.display(), e))
    })
}

/// Read one validation input from a JSON file, or stdin for `-`.
pub fn read_input(path: &Path) -> voxcheck::Result<ValidationInput> {
    let contents = read_source(path)?;
    parse_input(&contents)
}

/// Parse one validation input.
pub fn parse_input(contents: &str) -> voxcheck::Result<ValidationInput> {
    let value: Value = serde_json::from_str(contents)?;
    if !value.is_object() {
        return Err(VoxcheckError::Input(
            "Validation input must be a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Read a batch of validation inputs.
pub fn read_inputs(path: &Path) -> voxcheck::Result<Vec<ValidationInput>> {
    let contents = read_source(path)?;
    parse_inputs(&contents)
}

/// Parse a batch: either a JSON array of inputs or an object with an
/// `inputs` array.
pub fn parse_inputs(contents: &str) -> voxcheck::Result<Vec<ValidationInput>> {
    let value: Value = serde_json::from_str(contents)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("inputs") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(VoxcheckError::Input(
                    "Batch file must contain an 'inputs' array or be an array of inputs"
                        .to_string(),
                ));
            }
        },
        _ => {
            return Err(VoxcheckError::Input(
                "Invalid JSON format in batch file".to_string(),
            ));
        }
    };

    if items.is_empty() {
        return Err(VoxcheckError::Input(
            "No inputs found in batch file".to_string(),
        ));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| VoxcheckError::Input(format!("Input {}: {}", index, e)))
        })
        .collect()
}
