// src/noyau/config.rs
//
// Paramètres d’évaluation : échelle maximale + mode d’arrondi.
// Toujours valides une fois construits (bornes vérifiées à l’entrée).

use super::decimal::Arrondi;
use super::erreur::{ErreurCalcul, Resultat};

pub const ECHELLE_MIN: u32 = 1;
pub const ECHELLE_MAX: u32 = 32;
pub const ECHELLE_DEFAUT: u32 = 14;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigEval {
    echelle_max: u32,
    arrondi: Arrondi,
}

impl Default for ConfigEval {
    fn default() -> Self {
        Self {
            echelle_max: ECHELLE_DEFAUT,
            arrondi: Arrondi::HalfEven,
        }
    }
}

impl ConfigEval {
    pub fn new(echelle_max: u32, arrondi: Arrondi) -> Resultat<Self> {
        let mut config = Self::default();
        config.set_echelle_max(echelle_max)?;
        config.set_arrondi(arrondi)?;
        Ok(config)
    }

    pub fn echelle_max(&self) -> u32 {
        self.echelle_max
    }

    pub fn arrondi(&self) -> Arrondi {
        self.arrondi
    }

    /// Refuse toute échelle hors [1, 32] ; l’ancienne valeur est conservée.
    pub fn set_echelle_max(&mut self, echelle_max: u32) -> Resultat<()> {
        if !(ECHELLE_MIN..=ECHELLE_MAX).contains(&echelle_max) {
            return Err(ErreurCalcul::ConfigInvalide(format!(
                "échelle {echelle_max} hors [{ECHELLE_MIN}, {ECHELLE_MAX}]"
            )));
        }
        self.echelle_max = echelle_max;
        Ok(())
    }

    /// La division et la remise à l’échelle finale doivent pouvoir arrondir :
    /// `Unnecessary` est donc refusé.
    pub fn set_arrondi(&mut self, arrondi: Arrondi) -> Resultat<()> {
        if arrondi == Arrondi::Unnecessary {
            return Err(ErreurCalcul::ConfigInvalide(
                "le mode 'unnecessary' interdit l’arrondi".into(),
            ));
        }
        self.arrondi = arrondi;
        Ok(())
    }
}
