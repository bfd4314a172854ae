//! Fixed code/label tables for the competition selectors.
//!
//! The REST API speaks in upper-case codes (`MATEMATICA`), the screens in
//! labels (`Matemática`). Each enum converts both ways.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SharedError;

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($variant:ident => $code:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Code used by the REST API.
            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Label shown on screen.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        /// Accepts either the API code (any case) or the exact label.
        impl FromStr for $name {
            type Err = SharedError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::from_code(&s.to_uppercase())
                    .or_else(|| Self::from_label(s))
                    .ok_or_else(|| SharedError::UnknownCode(format!("{} {}", $what, s)))
            }
        }
    };
}

catalog! {
    /// Administrative status of a competition as set on the edit form.
    CompetitionStatus, "status" {
        Inscription => "INSCRIPCION", "Inscripción";
        Development => "DESARROLLO", "Desarrollo";
        Evaluation => "EVALUACION", "Evaluación";
        Amendments => "MODIFICACIONES", "Modificaciones";
        Finished => "FINALIZACION", "Finalización";
    }
}

catalog! {
    Level, "level" {
        Beginner => "PRINCIPIANTE", "Principiante";
        Intermediate => "INTERMEDIO", "Intermedio";
        Advanced => "AVANZADO", "Avanzado";
    }
}

catalog! {
    Area, "area" {
        Mathematics => "MATEMATICA", "Matemática";
        Physics => "FISICA", "Física";
        Robotics => "ROBOTICA", "Robótica";
        Chemistry => "QUIMICA", "Química";
        Programming => "PROGRAMACION", "Programación";
    }
}
