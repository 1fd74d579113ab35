// Walk the LibreHardwareMonitor sensor tree.
//
// Shape: root -> computer -> hardware -> category -> sensor, every node being
// {"Text": ..., "Value": ..., "Children": [...]}. Names differ between vendors
// and LHM versions, so everything is matched by lowercase substring and any
// missing level just yields no reading.

use crate::models::HardwareSample;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Cpu,
    Gpu,
}

fn children(node: &Value) -> impl Iterator<Item = &Value> {
    node.get("Children")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn text(node: &Value) -> String {
    node.get("Text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase()
}

fn classify(hardware_text: &str) -> Option<Component> {
    let t = hardware_text;
    if t.contains("intel")
        || (t.contains("amd") && !t.contains("radeon"))
        || (t.contains("core") && t.contains("cpu"))
    {
        Some(Component::Cpu)
    } else if t.contains("radeon") || t.contains("nvidia") || t.contains("gpu") {
        Some(Component::Gpu)
    } else {
        None
    }
}

/// "45.0 °C", "12.3 W", 57 -> whole units. Everything but digits, '.' and '-' is dropped.
pub fn parse_sensor_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f.trunc() as i64),
        Value::String(s) => {
            let numeric: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            numeric
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }
        _ => None,
    }
}

/// First sensor in `category` whose text matches, parsed.
fn find_sensor(category: &Value, matches: impl Fn(&str) -> bool) -> Option<i64> {
    children(category)
        .filter(|sensor| matches(&text(sensor)))
        .find_map(|sensor| sensor.get("Value").and_then(parse_sensor_value))
}

fn read_hardware(hardware: &Value, component: Component, out: &mut HardwareSample) {
    for category in children(hardware) {
        let category_text = text(category);
        let is_temp = category_text.contains("temperature");
        let is_power = category_text.contains("power");
        let is_load = category_text.contains("load");

        match component {
            Component::Cpu => {
                if is_temp && out.cpu_temp_c.is_none() {
                    out.cpu_temp_c = find_sensor(category, |s| s.contains("cpu package"));
                }
                if is_power && out.cpu_power_w.is_none() {
                    out.cpu_power_w = find_sensor(category, |s| s.contains("cpu package"));
                }
                if is_load && out.cpu_load_pct.is_none() {
                    out.cpu_load_pct = find_sensor(category, |s| s.contains("cpu total"));
                }
            }
            Component::Gpu => {
                if is_temp && out.gpu_temp_c.is_none() {
                    out.gpu_temp_c = find_sensor(category, |s| {
                        s.contains("gpu core") && !s.contains("distance")
                    });
                }
                if is_power && out.gpu_power_w.is_none() {
                    out.gpu_power_w = find_sensor(category, |s| s.contains("gpu package"));
                }
                if is_load && out.gpu_load_pct.is_none() {
                    out.gpu_load_pct = find_sensor(category, |s| s.contains("gpu core"));
                }
            }
        }
    }
}

/// Extract CPU/GPU temperature, power and load. Unknown shapes give an empty sample.
pub fn parse_sensors(tree: &Value) -> HardwareSample {
    let mut out = HardwareSample::unavailable();
    for computer in children(tree) {
        for hardware in children(computer) {
            if let Some(component) = classify(&text(hardware)) {
                read_hardware(hardware, component, &mut out);
            }
        }
    }
    out
}

/// Indented "Text: Value" listing of the whole tree.
pub fn format_tree(tree: &Value) -> String {
    fn walk(node: &Value, depth: usize, out: &mut String) {
        let label = node.get("Text").and_then(Value::as_str).unwrap_or("?");
        let value = match node.get("Value") {
            Some(Value::String(s)) if !s.is_empty() => format!(": {s}"),
            Some(Value::Number(n)) => format!(": {n}"),
            _ => String::new(),
        };
        out.push_str(&"  ".repeat(depth));
        out.push_str(label);
        out.push_str(&value);
        out.push('\n');
        for child in children(node) {
            walk(child, depth + 1, out);
        }
    }
    let mut out = String::new();
    walk(tree, 0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_separates_cpu_and_gpu() {
        assert_eq!(classify("intel core i7-9700k"), Some(Component::Cpu));
        assert_eq!(classify("amd ryzen 7 5800x"), Some(Component::Cpu));
        assert_eq!(classify("amd radeon rx 6800"), Some(Component::Gpu));
        assert_eq!(classify("nvidia geforce rtx 3080"), Some(Component::Gpu));
        assert_eq!(classify("generic memory"), None);
    }

    #[test]
    fn sensor_value_strips_units() {
        assert_eq!(parse_sensor_value(&json!("45.8 °C")), Some(45));
        assert_eq!(parse_sensor_value(&json!("120.2 W")), Some(120));
        assert_eq!(parse_sensor_value(&json!(57.9)), Some(57));
        assert_eq!(parse_sensor_value(&json!("-")), None);
        assert_eq!(parse_sensor_value(&json!("")), None);
        assert_eq!(parse_sensor_value(&json!(null)), None);
    }

    #[test]
    fn gpu_temperature_skips_hotspot_distance() {
        let hw = json!({"Text": "AMD Radeon RX 6800", "Children": [
            {"Text": "Temperatures", "Children": [
                {"Text": "GPU Core Distance to TjMax", "Value": "30.0 °C"},
                {"Text": "GPU Core", "Value": "61.0 °C"}
            ]}
        ]});
        let mut out = HardwareSample::unavailable();
        read_hardware(&hw, Component::Gpu, &mut out);
        assert_eq!(out.gpu_temp_c, Some(61));
    }

    #[test]
    fn format_tree_indents_children() {
        let tree = json!({"Text": "Sensor", "Value": "", "Children": [
            {"Text": "PC", "Value": "", "Children": [{"Text": "CPU Total", "Value": "12.0 %"}]}
        ]});
        assert_eq!(format_tree(&tree), "Sensor\n  PC\n    CPU Total: 12.0 %\n");
    }
}
