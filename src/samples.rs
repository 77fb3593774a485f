//! Illustrative figures from the reference run. These are not computed from
//! any input and are drawn as-is.

/// A named value drawn as one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Bar label.
    pub name: &'static str,
    /// Bar height.
    pub value: f64,
}

const fn sample(name: &'static str, value: f64) -> Sample {
    Sample {
        name: name,
        value: value,
    }
}

/// Detection scores, in drawing order.
pub const ACCURACY_SCORES: [Sample; 4] = [
    sample("Precision", 0.9723),
    sample("Recall", 1.0000),
    sample("F1-Score", 0.9859),
    sample("Accuracy", 0.9725),
];

/// Latency percentiles in milliseconds, in drawing order.
pub const LATENCY_PERCENTILES: [Sample; 3] = [
    sample("Average", 0.0243),
    sample("P95", 0.0292),
    sample("P99", 0.0486),
];

/// Resource figures; the name carries the unit in parentheses.
pub const RESOURCES: [Sample; 3] = [
    sample("CPU (%)", 16.67),
    sample("Memory (MB)", 54.31),
    sample("Network I/O (Mbps)", 568.42),
];

/// Annotation above an accuracy bar.
pub fn score_label(value: f64) -> String {
    format!("{:.4}", value)
}

/// Annotation above a latency bar.
pub fn latency_label(value: f64) -> String {
    format!("{:.4} ms", value)
}

/// Annotation above a resource bar.
pub fn resource_label(value: f64) -> String {
    format!("{:.2}", value)
}

impl Sample {
    /// First word of the name: `"Network I/O (Mbps)"` gives `"Network"`.
    pub fn short_name(&self) -> &'static str {
        self.name.split_whitespace().next().unwrap_or(self.name)
    }

    /// Text inside the parentheses: `"Memory (MB)"` gives `"MB"`.
    pub fn unit(&self) -> &'static str {
        match (self.name.find('('), self.name.rfind(')')) {
            (Some(l), Some(r)) if l < r => &self.name[l + 1..r],
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_documented_precision() {
        let labels = ACCURACY_SCORES
            .iter()
            .map(|s| score_label(s.value))
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["0.9723", "1.0000", "0.9859", "0.9725"]);

        let labels = LATENCY_PERCENTILES
            .iter()
            .map(|s| latency_label(s.value))
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["0.0243 ms", "0.0292 ms", "0.0486 ms"]);

        let labels = RESOURCES
            .iter()
            .map(|s| resource_label(s.value))
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["16.67", "54.31", "568.42"]);
    }

    #[test]
    fn resource_names_split() {
        let names = RESOURCES.iter().map(|s| s.short_name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["CPU", "Memory", "Network"]);
        let units = RESOURCES.iter().map(|s| s.unit()).collect::<Vec<_>>();
        assert_eq!(units, vec!["%", "MB", "Mbps"]);
    }

    #[test]
    fn order_is_fixed() {
        let names = ACCURACY_SCORES.iter().map(|s| s.name).collect::<Vec<_>>();
        assert_eq!(names, vec!["Precision", "Recall", "F1-Score", "Accuracy"]);
        let names = LATENCY_PERCENTILES.iter().map(|s| s.name).collect::<Vec<_>>();
        assert_eq!(names, vec!["Average", "P95", "P99"]);
    }
}
