use crate::core::definition::fill_definition;
use crate::domain::model::{Definition, MeasurementRequest, MeasurementType, ProbeSet};
use crate::utils::error::{AtlasError, Result};

impl MeasurementRequest {
    /// One-off request over the given probe sets, with no definitions yet.
    pub fn one_off(probes: Vec<ProbeSet>) -> Self {
        Self {
            definitions: Vec::new(),
            is_oneoff: true,
            probes,
        }
    }

    /// Appends a definition built from `fields`.
    ///
    /// A map that does not produce a valid definition leaves the request untouched.
    pub fn add_definition<I, K, V>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if let Err(e) = self.try_add_definition(fields) {
            tracing::warn!("Definition not added: {}", e);
        }
        self
    }

    pub fn try_add_definition<I, K, V>(&mut self, fields: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut def = Definition::default();
        fill_definition(&mut def, fields)?;
        self.definitions.push(def);
        Ok(self)
    }

    pub fn push_definition(&mut self, def: Definition) -> &mut Self {
        self.definitions.push(def);
        self
    }

    /// Fails unless every definition declares `expected` as its type.
    pub fn ensure_type(&self, expected: MeasurementType) -> Result<()> {
        match self
            .definitions
            .iter()
            .find(|def| def.measurement_type != expected.as_str())
        {
            Some(def) => Err(AtlasError::InvalidMeasurementType {
                expected: expected.to_string(),
                found: def.measurement_type.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> MeasurementRequest {
        MeasurementRequest::one_off(vec![ProbeSet::new(0, "", "", "")])
    }

    #[test]
    fn test_one_off_starts_empty() {
        let req = request();
        assert!(req.is_oneoff);
        assert!(req.definitions.is_empty());
        assert_eq!(req.probes.len(), 1);
    }

    #[test]
    fn test_add_definition_keeps_order() {
        let mut req = request();
        req.add_definition([("Type", "ping"), ("Target", "a.example")])
            .add_definition([("Type", "ping"), ("Target", "b.example")]);

        let targets: Vec<_> = req.definitions.iter().map(|d| d.target.as_str()).collect();
        assert_eq!(targets, vec!["a.example", "b.example"]);
    }

    #[test]
    fn test_add_definition_failure_leaves_request_unchanged() {
        let mut req = request();
        req.add_definition([("Type", "ping"), ("Target", "a.example")]);
        let before = req.clone();

        req.add_definition([("Type", "carrier-pigeon")]);
        assert_eq!(req, before);

        assert!(req.try_add_definition([("Target", "b.example")]).is_err());
        assert_eq!(req, before);
    }

    #[test]
    fn test_push_prebuilt_definition() {
        let mut req = request();
        let (def, _) =
            Definition::from_fields([("Type", "ntp"), ("Target", "pool.ntp.org")]).unwrap();
        req.push_definition(def.clone())
            .add_definition([("Type", "ntp"), ("Target", "time.example")]);

        assert_eq!(req.definitions[0], def);
        assert_eq!(req.definitions.len(), 2);
        assert!(req.ensure_type(MeasurementType::Ntp).is_ok());
    }

    #[test]
    fn test_ensure_type() {
        let mut req = request();
        assert!(req.ensure_type(MeasurementType::Dns).is_ok());

        req.add_definition([("Type", "ping")]).add_definition([("Type", "dns")]);
        assert!(req.ensure_type(MeasurementType::Ping).is_err());

        match req.ensure_type(MeasurementType::Dns) {
            Err(AtlasError::InvalidMeasurementType { expected, found }) => {
                assert_eq!(expected, "dns");
                assert_eq!(found, "ping");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
