// Built-in Spanish product-review taxonomy.
//
// Order matters: ties are resolved in favour of the topic listed first.
// "color" is intentionally listed under both display and design.

pub(crate) const BUILTIN_TOPICS: &[(&str, &[&str])] = &[
    (
        "rendimiento",
        &[
            "velocidad",
            "potencia",
            "rendimiento",
            "lag",
            "fluidez",
            "eficiencia",
            "rapidez",
            "procesador",
            "frames",
            "fps",
            "tiempo de carga",
            "respuesta",
        ],
    ),
    (
        "calidad_de_fabricacion",
        &[
            "calidad",
            "materiales",
            "resistente",
            "acabado",
            "construcción",
            "durabilidad",
            "robusto",
            "plástico",
            "metal",
            "carcasa",
            "fragil",
            "debil",
        ],
    ),
    (
        "bateria_y_energia",
        &[
            "batería",
            "autonomía",
            "carga",
            "cargador",
            "duración",
            "consumo",
            "energía",
            "powerbank",
            "rapida",
            "lenta",
            "enchufe",
            "adaptador",
        ],
    ),
    (
        "pantalla_y_visualizacion",
        &[
            "pantalla",
            "resolución",
            "brillo",
            "color",
            "contraste",
            "ángulo de visión",
            "oled",
            "lcd",
            "display",
            "nitidez",
            "reflejos",
        ],
    ),
    (
        "audio_y_sonido",
        &[
            "sonido",
            "audio",
            "volumen",
            "altavoz",
            "auriculares",
            "ruido",
            "graves",
            "agudos",
            "microfono",
            "claridad",
            "ecualizador",
        ],
    ),
    (
        "facilidad_de_uso",
        &[
            "fácil",
            "difícil",
            "intuitivo",
            "configuración",
            "manual",
            "menú",
            "interfaz",
            "instalación",
            "plug and play",
            "conectar",
            "actualizar",
        ],
    ),
    (
        "conectividad_y_compatibilidad",
        &[
            "wifi",
            "bluetooth",
            "usb",
            "hdmi",
            "conexion",
            "inalámbrico",
            "sincronizar",
            "app",
            "compatibilidad",
            "drivers",
            "red",
        ],
    ),
    (
        "software_y_funciones",
        &[
            "software",
            "firmware",
            "aplicación",
            "funciones",
            "opciones",
            "errores",
            "bugs",
            "actualización",
            "rendimiento del sistema",
            "interfaz gráfica",
        ],
    ),
    (
        "precio_y_valor",
        &[
            "precio",
            "barato",
            "caro",
            "oferta",
            "valor",
            "calidad-precio",
            "inversión",
            "compensa",
            "coste",
            "económico",
        ],
    ),
    (
        "diseno_y_estetica",
        &[
            "diseño",
            "color",
            "tamaño",
            "peso",
            "ergonomía",
            "estética",
            "compacto",
            "portátil",
            "elegante",
            "moderno",
        ],
    ),
    (
        "atencion_al_cliente_y_envio",
        &[
            "envío",
            "entrega",
            "paquete",
            "servicio",
            "soporte",
            "garantía",
            "reclamación",
            "atención",
            "Amazon",
            "reembolso",
            "devolución",
        ],
    ),
    (
        "experiencia_general",
        &[
            "satisfecho",
            "recomendado",
            "expectativas",
            "problemas",
            "feliz",
            "decepcionado",
            "defectuoso",
            "excelente",
            "malo",
            "perfecto",
        ],
    ),
];
