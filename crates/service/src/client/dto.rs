use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::Client;

/// External representation of a client.
///
/// Shape-identical to [`Client`]; `id` is absent for records that have not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    #[serde(default)]
    pub children: i32,
}

impl ClientDto {
    pub fn to_entity(&self) -> Client {
        Client::from(self.clone())
    }

    /// Overwrite every mutable field of `entity`; the identifier is left untouched.
    pub(crate) fn copy_onto(self, entity: &mut Client) {
        entity.name = self.name;
        entity.cpf = self.cpf;
        entity.income = self.income;
        entity.birth_date = self.birth_date;
        entity.children = self.children;
    }
}

impl From<Client> for ClientDto {
    fn from(c: Client) -> Self {
        Self { id: c.id, name: c.name, cpf: c.cpf, income: c.income, birth_date: c.birth_date, children: c.children }
    }
}

impl From<ClientDto> for Client {
    fn from(d: ClientDto) -> Self {
        Self { id: d.id, name: d.name, cpf: d.cpf, income: d.income, birth_date: d.birth_date, children: d.children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pablo() -> Client {
        Client {
            id: Some(1),
            name: "Pablo Alberto".into(),
            cpf: "10212012020".into(),
            income: 2000.0,
            birth_date: Utc.with_ymd_and_hms(1958, 9, 20, 8, 0, 0).unwrap(),
            children: 1,
        }
    }

    #[test]
    fn entity_dto_entity_preserves_every_field() {
        let dto = ClientDto::from(pablo());
        let again = ClientDto::from(dto.to_entity());
        assert_eq!(again, dto);
        assert_eq!(dto.to_entity(), pablo());
    }

    #[test]
    fn copy_onto_keeps_identifier() {
        let mut stored = pablo();
        let incoming = ClientDto {
            id: Some(99),
            name: "B".into(),
            cpf: "222".into(),
            income: 200.0,
            birth_date: Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap(),
            children: 3,
        };
        incoming.clone().copy_onto(&mut stored);
        assert_eq!(stored.id, Some(1));
        assert_eq!(stored.name, "B");
        assert_eq!(stored.cpf, "222");
        assert_eq!(stored.income, 200.0);
        assert_eq!(stored.birth_date, incoming.birth_date);
        assert_eq!(stored.children, 3);
    }

    #[test]
    fn wire_form_uses_camel_case() {
        let json = serde_json::to_value(ClientDto::from(pablo())).unwrap();
        assert_eq!(json["birthDate"], "1958-09-20T08:00:00Z");
        assert_eq!(json["id"], 1);

        let parsed: ClientDto = serde_json::from_str(
            r#"{"name":"New","cpf":"3","income":10.5,"birthDate":"2001-02-03T04:05:06Z"}"#,
        )
        .unwrap();
        assert_eq!(parsed.id, None);
        assert_eq!(parsed.children, 0);
    }
}
