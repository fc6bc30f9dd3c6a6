// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in catalog of Colombia's departments.

use crate::catalog::Catalog;
use crate::region::Region;
use crate::region::RegionGroup::{Amazonia, Andina, Caribe, Insular, Orinoquia, Pacifica};

/// Id of the island department drawn as an inset on most maps of Colombia.
pub const SAN_ANDRES: &str = "san_andres";

/// The 32 departments plus the capital district, in classroom order.
#[rustfmt::skip]
pub fn colombia_regions() -> Vec<Region> {
    vec![
        Region::new("antioquia", "Antioquia", "Medellín", Andina).with_population(6_500_000),
        Region::new("valle", "Valle del Cauca", "Cali", Pacifica).with_population(4_500_000)
            .with_alias("valle_del_cauca"),
        Region::new("cundinamarca", "Cundinamarca", "Bogotá", Andina).with_population(3_000_000),
        Region::new("atlantico", "Atlántico", "Barranquilla", Caribe).with_population(2_600_000),
        Region::new("bolivar", "Bolívar", "Cartagena", Caribe).with_population(2_100_000),
        Region::new("magdalena", "Magdalena", "Santa Marta", Caribe).with_population(1_300_000),
        Region::new("santander", "Santander", "Bucaramanga", Andina).with_population(2_200_000),
        Region::new("norte_santander", "Norte de Santander", "Cúcuta", Andina).with_population(1_600_000)
            .with_alias("norte_de_santander"),
        Region::new("boyaca", "Boyacá", "Tunja", Andina).with_population(1_200_000),
        Region::new("quindio", "Quindío", "Armenia", Andina).with_population(600_000),
        Region::new("risaralda", "Risaralda", "Pereira", Andina).with_population(1_000_000),
        Region::new("caldas", "Caldas", "Manizales", Andina).with_population(1_000_000),
        Region::new("tolima", "Tolima", "Ibagué", Andina).with_population(1_400_000),
        Region::new("huila", "Huila", "Neiva", Andina).with_population(1_300_000),
        Region::new("bogota", "Bogotá D.C.", "Bogotá", Andina).with_population(8_000_000),
        Region::new("narinio", "Nariño", "Pasto", Pacifica).with_population(1_600_000)
            .with_alias("narino"),
        Region::new("choco", "Chocó", "Quibdó", Pacifica).with_population(550_000),
        Region::new("cauca", "Cauca", "Popayán", Pacifica).with_population(1_500_000),
        Region::new("cesar", "Cesar", "Valledupar", Caribe).with_population(1_200_000),
        Region::new("cordoba", "Córdoba", "Montería", Caribe).with_population(1_700_000),
        Region::new("sucre", "Sucre", "Sincelejo", Caribe).with_population(900_000),
        Region::new("guajira", "La Guajira", "Riohacha", Caribe).with_population(1_000_000),
        Region::new("arauca", "Arauca", "Arauca", Orinoquia).with_population(300_000),
        Region::new("casanare", "Casanare", "Yopal", Orinoquia).with_population(450_000),
        Region::new("meta", "Meta", "Villavicencio", Orinoquia).with_population(1_100_000),
        Region::new("vichada", "Vichada", "Puerto Carreño", Orinoquia).with_population(120_000),
        Region::new("guaviare", "Guaviare", "San José del Guaviare", Orinoquia).with_population(250_000),
        Region::new("guainia", "Guainía", "Inírida", Amazonia).with_population(50_000),
        Region::new("vaupes", "Vaupés", "Mitú", Amazonia).with_population(45_000),
        Region::new("caqueta", "Caquetá", "Florencia", Amazonia).with_population(420_000),
        Region::new("amazonas", "Amazonas", "Leticia", Amazonia).with_population(80_000),
        Region::new("putumayo", "Putumayo", "Mocoa", Amazonia).with_population(350_000),
        Region::new("san_andres", "San Andrés y Providencia", "San Andrés", Insular).with_population(80_000)
            .with_alias("san_andres_y_providencia"),
    ]
}

impl Catalog {
    /// The built-in catalog of Colombia's departments.
    pub fn colombia() -> Self {
        Self::from_validated(colombia_regions())
    }
}
