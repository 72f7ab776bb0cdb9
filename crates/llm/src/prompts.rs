//! Prompt templates
//!
//! Both prompts are in Spanish, the language of the audited call-center
//! notes and of the generated report.

use lead_audit_core::{AnalysisStats, ProcessedLead};

/// Grounded web-search prompt for a country's mobile numbering plan
pub fn lookup_prompt(country_name: &str) -> String {
    format!(
        r"Investiga el plan de numeración oficial vigente para teléfonos MÓVILES (celulares) en: {country}.

TU TAREA:
1. Identificar cuántos dígitos debe tener un número móvil válido (sin contar el código de país).
2. Identificar los prefijos móviles comunes.
3. Generar una expresión regular que valide estos números.
   - Debe aceptar el código de país opcional.
   - Debe exigir estrictamente la longitud correcta de dígitos significativos.
   - No uses lookahead ni lookbehind.

FORMATO DE SALIDA REQUERIDO (estricto):

REGEX_START
<la expresión regular, ej: ^(\+?57)?3\d{{9}}$>
REGEX_END

EXPLANATION_START
<una frase sobre el formato, ej: En Colombia son 10 dígitos iniciando por 3.>
EXPLANATION_END
",
        country = country_name
    )
}

/// Executive-summary prompt over the batch stats and a problematic sample
pub fn narrative_prompt(
    stats: &AnalysisStats,
    country_name: &str,
    sample: &[ProcessedLead],
    sample_limit: usize,
) -> String {
    let recoverable = stats.share(stats.recoverable_count);
    let invalid = stats.share(stats.invalid_count);
    let special = stats.share(stats.special_count);

    let mut prompt = format!(
        r#"Actúa como un Analista Senior de Operaciones de Call Center B2B.
Hemos analizado una base de leads del mercado: {country}, tipificados por los agentes como "TELÉFONO ERRÓNEO".

TU OBJETIVO:
Validar si la tipificación es correcta o si se están perdiendo oportunidades por mala gestión de contactabilidad.

DATOS DEL ANÁLISIS:
- Total leads analizados: {total}
- OPORTUNIDADES RECUPERABLES (Contactabilidad): {rec_n} leads ({recoverable:.1}%) -> formato válido pero sin respuesta.
- DESCARTES CONFIRMADOS (Inválidos): {inv_n} leads ({invalid:.1}%) -> formato incorrecto o número inexistente.
- REVISIÓN MANUAL (Casos especiales): {spe_n} leads ({special:.1}%) -> contestaron pero indicaron "equivocado" u otro motivo.

MUESTRA DE CASOS ESPECIALES/PROBLEMÁTICOS:
"#,
        country = country_name,
        total = stats.total,
        rec_n = stats.recoverable_count,
        inv_n = stats.invalid_count,
        spe_n = stats.special_count,
    );

    for lead in sample.iter().take(sample_limit) {
        prompt.push_str(&sample_line(lead));
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        r#"
Genera un "Resumen Ejecutivo de Hallazgos" para la Dirección Comercial, estrictamente en estos puntos:

1. DIAGNÓSTICO DE CALIDAD DE DATOS
Qué porcentaje de la base es realmente descartable frente a recuperable, y si "Teléfono Erróneo" se usa como excusa para no insistir.

2. ANÁLISIS DE PATRONES DE ERROR
Qué muestran las muestras y los números (buzón tras pocos intentos, fallos de validación en el formulario de registro, etc.).

3. RECOMENDACIONES DE ACCIÓN
Dos o tres acciones concretas, por ejemplo una campaña de SMS/WhatsApp para el {recoverable:.0}% de leads recuperables.

Formato: texto plano profesional, directo, sin markdown complejo.
"#
    ));

    prompt
}

/// `- Tel: {clean} | Obs: "{notes}" | Clasificación: {label}`
pub fn sample_line(lead: &ProcessedLead) -> String {
    format!(
        "- Tel: {} | Obs: \"{}\" | Clasificación: {}",
        lead.clean_phone,
        lead.notes,
        lead.status.as_str()
    )
}
