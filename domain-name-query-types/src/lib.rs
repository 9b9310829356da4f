use std::fmt;
use std::str::FromStr;

/// Record types this client knows how to ask for and decode.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum QType {
    A,
    Mx,
    Txt,
    Aaaa,
}

impl QType {
    pub const ALL: [QType; 4] = [QType::A, QType::Mx, QType::Txt, QType::Aaaa];

    pub fn code(&self) -> u16 {
        match self {
            QType::A => 1,
            QType::Mx => 15,
            QType::Txt => 16,
            QType::Aaaa => 28,
        }
    }
}

impl TryFrom<u16> for QType {
    type Error = u16;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(QType::A),
            15 => Ok(QType::Mx),
            16 => Ok(QType::Txt),
            28 => Ok(QType::Aaaa),
            other => Err(other),
        }
    }
}

impl fmt::Display for QType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            QType::A => "A",
            QType::Mx => "MX",
            QType::Txt => "TXT",
            QType::Aaaa => "AAAA",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownQType(pub String);

impl fmt::Display for UnknownQType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown record type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownQType {}

// 菜单里输入的是数字代码，也接受 "MX" 这样的助记符
impl FromStr for QType {
    type Err = UnknownQType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u16>() {
            return QType::try_from(code).map_err(|_| UnknownQType(s.to_string()));
        }

        QType::ALL
            .into_iter()
            .find(|q_type| q_type.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownQType(s.to_string()))
    }
}

pub type Name = String;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NameQuery {
    pub name: Name,
    pub q_type: QType,
}

impl NameQuery {
    pub fn new(name_str: &str, q_type: QType) -> Self {
        Self {
            name: Name::from(name_str),
            q_type,
        }
    }

    pub fn a_record(name_str: &str) -> Self {
        Self::new(name_str, QType::A)
    }
}
